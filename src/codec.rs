//! Line codec for the two persisted record types.
//!
//! The format is comma- and pipe-delimited with no quoting: a `,` or `|`
//! inside a username or post text corrupts parsing. Signup validation keeps
//! those characters out of usernames; post text is written as-is, so the
//! round trip is lossy for text containing a comma. Decoding is tolerant:
//! anything that does not fit the shape yields `None` and the caller skips
//! the line.

/// A user line as persisted: the username plus both edge lists by name.
/// Resolution back into graph edges happens at load, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub username: String,
    pub following: Vec<String>,
    pub followers: Vec<String>,
}

/// A post line as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub author: String,
    pub text: String,
    pub likes: u32,
}

/// Encode a user record as `<name>,<f1>|<f2>|...|,<g1>|<g2>|...|`.
/// Every list entry gets a trailing `|`; an empty list is an empty field.
pub fn encode_user(record: &UserRecord) -> String {
    let mut line = String::new();
    line.push_str(&record.username);
    line.push(',');
    for name in &record.following {
        line.push_str(name);
        line.push('|');
    }
    line.push(',');
    for name in &record.followers {
        line.push_str(name);
        line.push('|');
    }
    line
}

/// Decode a user line. Only a blank line fails; a short line yields empty
/// lists and extra comma fields are ignored, mirroring how the files have
/// always been read.
pub fn decode_user(line: &str) -> Option<UserRecord> {
    if line.trim().is_empty() {
        return None;
    }
    let mut fields = line.split(',');
    let username = fields.next().unwrap_or("").to_string();
    let following = split_names(fields.next().unwrap_or(""));
    let followers = split_names(fields.next().unwrap_or(""));
    Some(UserRecord {
        username,
        following,
        followers,
    })
}

/// Encode a post record as `<author>,<text>,<likes>`.
pub fn encode_post(record: &PostRecord) -> String {
    format!("{},{},{}", record.author, record.text, record.likes)
}

/// Decode a post line. Fails if the line has fewer than three fields or the
/// third field does not start with an integer.
pub fn decode_post(line: &str) -> Option<PostRecord> {
    let mut fields = line.splitn(3, ',');
    let author = fields.next()?.to_string();
    let text = fields.next()?.to_string();
    let likes = parse_leading_u32(fields.next()?)?;
    Some(PostRecord { author, text, likes })
}

/// Split a pipe-delimited name list, dropping the empty tokens the trailing
/// `|` convention produces.
fn split_names(field: &str) -> Vec<String> {
    field
        .split('|')
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Parse the integer prefix of a field, stream-extraction style: leading
/// whitespace is skipped, digits are consumed, anything after them is
/// ignored. No digits means no value.
fn parse_leading_u32(field: &str) -> Option<u32> {
    let trimmed = field.trim_start();
    let digits: &str = {
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
