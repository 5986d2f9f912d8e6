/// A line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Add(String),
    List,
    ListAll,
    Exit,
    Unknown(String),
}

pub fn parse(input: &str) -> Line {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "" => Line::Unknown(String::new()),
        "exit" | "quit" => Line::Exit,
        "list all" => Line::ListAll,
        "list" => Line::List,
        "add" => Line::Add(String::new()),
        _ if lower.starts_with("add ") => Line::Add(trimmed[4..].trim().to_string()),
        _ => Line::Unknown(trimmed.to_string()),
    }
}
