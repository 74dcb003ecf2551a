//! Job names and JOB card templating.
//!
//! Callers may hand the manager raw JCL with or without a JOB card. When a
//! card is needed it is rendered from [`JobCard`] settings, folded onto
//! continuation lines when it would run past column 71.

use std::fmt;

use rand::Rng;

use zosgate::names::validate_job_name;
use zosgate::BatchConfig;

use crate::error::BatchError;

/// Last usable column of a JCL statement before the continuation column.
const MAX_CARD_WIDTH: usize = 71;

/// Characters used for generated job name suffixes.
const SUFFIX_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A validated, uppercased job name (1-8 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jobname(String);

impl Jobname {
    /// Validate and uppercase a caller-supplied job name.
    pub fn new(name: impl Into<String>) -> Result<Self, BatchError> {
        let name = name.into().to_uppercase();
        validate_job_name(&name)?;
        Ok(Self(name))
    }

    /// Generate a job name from a prefix plus a random alphanumeric
    /// suffix, padded to the full 8 characters.
    pub fn generated(prefix: &str) -> Result<Self, BatchError> {
        let prefix = prefix.to_uppercase();
        let head: String = prefix.chars().take(7).collect();
        let mut rng = rand::thread_rng();
        let mut name = head;
        while name.len() < 8 {
            let c = SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())] as char;
            name.push(c);
        }
        validate_job_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jobname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Jobname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// JOB card parameters, taken from [`BatchConfig`].
#[derive(Debug, Clone)]
pub struct JobCard {
    pub account: String,
    pub programmer: String,
    pub input_class: String,
    pub msg_class: String,
}

impl JobCard {
    /// Build a card template from batch configuration.
    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            account: config.account.clone(),
            programmer: config.programmer.clone(),
            input_class: config.input_class.clone(),
            msg_class: config.msg_class.clone(),
        }
    }

    /// Render the JOB statement for a job name, folding onto continuation
    /// lines when the card would run past column 71.
    pub fn render(&self, jobname: &Jobname) -> String {
        let head = format!("//{:<8} JOB ", jobname.as_str());
        let params = format!(
            "({}),'{}',CLASS={},MSGCLASS={}",
            self.account, self.programmer, self.input_class, self.msg_class
        );
        fold_statement(&head, &params)
    }
}

/// Fold `head + params` at top-level commas so no line passes column 71.
fn fold_statement(head: &str, params: &str) -> String {
    if head.len() + params.len() <= MAX_CARD_WIDTH {
        return format!("{}{}", head, params);
    }

    let segments = split_top_level(params);
    let continuation = "//             ";
    let mut lines: Vec<String> = Vec::new();
    let mut current = head.to_string();
    let mut first_on_line = true;

    for segment in segments {
        let sep = if first_on_line { "" } else { "," };
        if !first_on_line && current.len() + sep.len() + segment.len() + 1 > MAX_CARD_WIDTH {
            current.push(',');
            lines.push(current);
            current = format!("{}{}", continuation, segment);
        } else {
            current.push_str(sep);
            current.push_str(&segment);
        }
        first_on_line = false;
    }
    lines.push(current);
    lines.join("\n")
}

/// Split a parameter string at commas outside quotes and parentheses.
fn split_top_level(params: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quoted = false;
    for c in params.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                current.push(c);
            }
            '(' if !quoted => {
                depth += 1;
                current.push(c);
            }
            ')' if !quoted => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if !quoted && depth == 0 => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Extract the job name from the first `//name JOB` card, if any.
pub fn extract_job_name(jcl: &str) -> Option<String> {
    for line in jcl.lines() {
        let line = line.trim_end();
        if line.starts_with("//") && !line.starts_with("//*") {
            let rest = &line[2..];
            if let Some(space_pos) = rest.find(|c: char| c.is_whitespace()) {
                let name = &rest[..space_pos];
                let after = rest[space_pos..].trim_start();
                if after.starts_with("JOB") {
                    return Some(name.to_uppercase());
                }
            }
        }
    }
    None
}

/// Whether the JCL already carries a JOB card.
pub fn has_job_card(jcl: &str) -> bool {
    extract_job_name(jcl).is_some()
}

/// Prepend a JOB card to raw JCL.
pub fn with_job_card(card: &str, jcl: &str) -> String {
    format!("{}\n{}", card, jcl)
}
