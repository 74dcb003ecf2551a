//! z/OS name and path validation.
//!
//! One check per field, applied before any REST call: job names, dataset
//! names, PDS member names, and UNIX paths.

use crate::error::NameError;

/// Returns `true` for characters allowed to start a z/OS name segment:
/// alphabetic or national (`@`, `#`, `$`).
fn is_initial(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '@' || c == '#' || c == '$'
}

/// Returns `true` for characters allowed in the rest of a name segment.
fn is_subsequent(c: char) -> bool {
    is_initial(c) || c.is_ascii_digit()
}

/// Validate a job name: 1-8 characters, initial alphabetic/national,
/// the rest alphanumeric/national. Case-insensitive.
pub fn validate_job_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() || name.len() > 8 {
        return Err(NameError::JobNameLength(name.to_string()));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or(' ');
    if !is_initial(first.to_ascii_uppercase()) || !chars.all(|c| is_subsequent(c.to_ascii_uppercase())) {
        return Err(NameError::JobNameCharacter(name.to_string()));
    }
    Ok(())
}

/// Validate a dataset name: at most 44 characters, dot-separated qualifiers
/// of 1-8 characters, each starting alphabetic/national. A trailing
/// `(MEMBER)` suffix is validated as a member name.
pub fn validate_dataset_name(name: &str) -> Result<(), NameError> {
    let (dsn, member) = split_member(name);
    if dsn.is_empty() || dsn.len() > 44 {
        return Err(NameError::DatasetNameLength(name.to_string()));
    }
    for qualifier in dsn.split('.') {
        if qualifier.is_empty() || qualifier.len() > 8 {
            return Err(NameError::DatasetNameQualifier(name.to_string()));
        }
        let mut chars = qualifier.chars();
        let first = chars.next().unwrap_or(' ');
        if !is_initial(first.to_ascii_uppercase())
            || !chars.all(|c| {
                let u = c.to_ascii_uppercase();
                is_subsequent(u) || u == '-'
            })
        {
            return Err(NameError::DatasetNameQualifier(name.to_string()));
        }
    }
    if let Some(member) = member {
        validate_member_name(member)?;
    }
    Ok(())
}

/// Validate a PDS member name: 1-8 characters, same charset as a qualifier.
pub fn validate_member_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() || name.len() > 8 {
        return Err(NameError::MemberNameLength(name.to_string()));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or(' ');
    if !is_initial(first.to_ascii_uppercase()) || !chars.all(|c| is_subsequent(c.to_ascii_uppercase())) {
        return Err(NameError::MemberNameCharacter(name.to_string()));
    }
    Ok(())
}

/// Validate a UNIX path: must be absolute.
pub fn validate_unix_path(path: &str) -> Result<(), NameError> {
    if !path.starts_with('/') {
        return Err(NameError::UnixPathNotAbsolute(path.to_string()));
    }
    Ok(())
}

/// Split `DSN(MEMBER)` into the dataset part and the optional member part.
pub fn split_member(name: &str) -> (&str, Option<&str>) {
    match name.find('(') {
        Some(open) => {
            let close = name.rfind(')').unwrap_or(name.len());
            (&name[..open], Some(&name[open + 1..close]))
        }
        None => (name, None),
    }
}
