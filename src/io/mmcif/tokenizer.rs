//! Field splitter for one logical mmCIF record.
//!
//! A record is either a physical line or several lines glued together by the reader
//! (short loop rows and `;` text fields). The splitter honors the quoting rules of the
//! format as found in practice:
//!
//! * double quotes open anywhere and close at the next double quote;
//! * a single quote opens only after whitespace and closes only before whitespace or
//!   the end of the record, so apostrophes inside names stay literal;
//! * a `;` next to whitespace opens a text field, which runs until a `;` that directly
//!   follows a newline; newlines inside the field are dropped and any other `;` is a
//!   plain character.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Bare,
    DoubleQuoted,
    SingleQuoted,
    TextField,
}

/// Fields of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Tokens {
    pub fields: Vec<String>,
    /// Set when the record ended inside a quoted value; the partial field is kept.
    pub unterminated: bool,
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub(crate) fn tokenize(record: &str) -> Tokens {
    let chars: Vec<char> = record.chars().collect();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut state = State::Bare;

    for (i, &c) in chars.iter().enumerate() {
        let prev = if i == 0 { ' ' } else { chars[i - 1] };
        let next = chars.get(i + 1).copied().unwrap_or(' ');

        match state {
            State::TextField => {
                if c == ';' && prev == '\n' {
                    state = State::Bare;
                } else if c != '\n' {
                    current.push(c);
                }
            }
            State::DoubleQuoted => {
                if c == '"' {
                    state = State::Bare;
                } else {
                    current.push(c);
                }
            }
            State::SingleQuoted => {
                if c == '\'' && is_blank(next) {
                    state = State::Bare;
                } else {
                    current.push(c);
                }
            }
            State::Bare => match c {
                c if is_blank(c) => {
                    if !current.is_empty() || quoted {
                        fields.push(std::mem::take(&mut current));
                    }
                    quoted = false;
                }
                '"' => {
                    state = State::DoubleQuoted;
                    quoted = true;
                }
                '\'' if is_blank(prev) => {
                    state = State::SingleQuoted;
                    quoted = true;
                }
                ';' if is_blank(prev) || is_blank(next) => {
                    state = State::TextField;
                    quoted = true;
                }
                _ => current.push(c),
            },
        }
    }

    if !current.is_empty() || quoted {
        fields.push(current);
    }

    Tokens {
        fields,
        unterminated: state != State::Bare,
    }
}
