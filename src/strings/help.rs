//! # Help Text
//!
//! The help template shown for `help`, greetings and anything the bot did not understand.

pub const HELP_LEAD: &str = "Sure, I can provide help info about me.";
pub const WELCOME_LEAD: &str = "## Welcome to the Contoso Talent Management app";
pub const NOT_UNDERSTOOD_LEAD: &str = "I'm sorry, I did not understand you :(";

const BODY: &str = concat!(
    "Here's what I can help you do: \n\n",
    "* Show details about a candidate, for example: candidate details John Smith 0F812D01 \n",
    "* Show top recent candidates for a Req ID, for example: top candidates 0F812D01 \n",
    "* List all your open positions, for example: open positions \n",
    "* Create a new job posting, for example: new job posting \n",
    "* Sign in to see your profile: login"
);

/// Renders the help message under the given leading line.
pub fn help_message(first_line: &str) -> String {
    format!("{first_line} \n\n {BODY}")
}
