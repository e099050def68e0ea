//! # Messages
//!
//! Constant strings and format functions for user-facing replies.

pub const SOMETHING_WENT_WRONG: &str = "Something went wrong, please try again.";
pub const TOP_CANDIDATES: &str =
    "Okay, here are top candidates who have recently applied to your position";
pub const INVALID_FILE_TYPE: &str =
    "Invalid file type. Please upload a job description as a .docx or .pdf file.";

pub fn open_positions(sender: &str, count: usize) -> String {
    format!("Hi {sender}! You have {count} active postings right now:")
}

pub fn candidate_not_found(name: &str) -> String {
    format!("I couldn't find a candidate named {name}.")
}

pub fn signed_in(display_name: &str, mail: Option<&str>) -> String {
    match mail {
        Some(mail) => format!("You're signed in as {display_name} ({mail})."),
        None => format!("You're signed in as {display_name}."),
    }
}

pub fn posting_created(title: &str, req_id: &str) -> String {
    format!(
        "Job posting **{title}** ({req_id}) has been created. Upload the job description (.docx or .pdf) to attach it."
    )
}

pub fn file_received(name: &str) -> String {
    format!("Received your file **{name}**.")
}

pub fn job_description_attached(name: &str, title: &str) -> String {
    format!("Received **{name}** and attached it as the job description for **{title}**.")
}

pub fn invalid_field(field: &str, reason: &str) -> String {
    format!("⚠️ Invalid value for `{field}`: {reason}")
}
