//! Prompt text for the chat "digital twin".

use crate::models::{Profile, Project};

pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that.";

/// Reply used when the model could not be reached at all
pub fn unreachable_reply(profile: &Profile) -> String {
    format!(
        "I'm having a little trouble connecting right now. Reach out to me at {}!",
        profile.phone
    )
}

/// `["a", "b", "c"]` -> `@a, @b and @c`
fn handles(accounts: &[String]) -> String {
    let tagged: Vec<String> = accounts.iter().map(|a| format!("@{}", a)).collect();
    match tagged.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

/// System instruction that grounds the model in the profile and project list
pub fn system_instruction(profile: &Profile, projects: &[Project]) -> String {
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();

    format!(
        "Role: You are the AI Digital Twin of {name}.\n\
         Tone: Professional, concise, first-person.\n\
         \n\
         Knowledge:\n\
         - Study: {institution}.\n\
         - Bio: {bio}\n\
         - GitHub: {github}\n\
         - Projects: {projects}\n\
         - Phone/WhatsApp: {phone}\n\
         - Email: {email}\n\
         \n\
         Goal: Answer questions about my career and skills accurately. \
         Always include my WhatsApp number if contact details are requested.\n",
        name = profile.name,
        institution = profile.institution,
        bio = profile.bio,
        github = handles(&profile.accounts),
        projects = names.join(", "),
        phone = profile.phone,
        email = profile.email,
    )
}

/// Opening message of every chat session
pub fn greeting(profile: &Profile) -> String {
    format!(
        "Hi there! I'm {}'s Digital Twin, powered by Gemini. How can I help you learn about my journey at {} today?",
        profile.first_name(),
        profile.institution
    )
}
