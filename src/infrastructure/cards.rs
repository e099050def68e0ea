//! # Card Rendering
//!
//! Renders talent records as Bot Framework card attachments (Adaptive, thumbnail and OAuth cards).
//! Rendering is pure and never fails; a record that cannot be serialized renders without its payload.

use serde_json::{Value, json};

use crate::domain::traits::{CardRenderer, CardStyle, CardSubject};
use crate::domain::types::{Candidate, Card, OpenPosition};

pub const ADAPTIVE: &str = "application/vnd.microsoft.card.adaptive";
pub const THUMBNAIL: &str = "application/vnd.microsoft.card.thumbnail";
pub const OAUTH: &str = "application/vnd.microsoft.card.oauth";

const ADAPTIVE_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const ADAPTIVE_VERSION: &str = "1.2";

#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveCardRenderer;

impl CardRenderer for AdaptiveCardRenderer {
    fn render(&self, subject: CardSubject<'_>, style: CardStyle) -> Card {
        match (subject, style) {
            (CardSubject::Candidate(c), CardStyle::FullDetail) => candidate_details(c),
            (CardSubject::Candidate(c), CardStyle::Preview) => candidate_preview(c),
            (CardSubject::Candidate(c), _) => candidate_summary(c),
            (CardSubject::Position(p), CardStyle::FullDetail) => position_details(p),
            (CardSubject::Position(p), CardStyle::ThumbnailWithActions) => position_thumbnail(p, true),
            (CardSubject::Position(p), _) => position_thumbnail(p, false),
            (CardSubject::PostingForm(locations), _) => posting_form(locations),
            (CardSubject::PostingActions { details_url }, _) => posting_actions(details_url),
            (CardSubject::SignIn { connection_name }, _) => sign_in(connection_name),
        }
    }
}

fn adaptive(body: Value, actions: Value) -> Card {
    Card {
        content_type: ADAPTIVE.to_string(),
        content: json!({
            "$schema": ADAPTIVE_SCHEMA,
            "type": "AdaptiveCard",
            "version": ADAPTIVE_VERSION,
            "body": body,
            "actions": actions,
        }),
        preview: None,
    }
}

fn thumbnail(content: Value) -> Card {
    Card {
        content_type: THUMBNAIL.to_string(),
        content,
        preview: None,
    }
}

fn facts(pairs: &[(&str, String)]) -> Value {
    let facts: Vec<Value> = pairs
        .iter()
        .map(|(title, value)| json!({ "title": title, "value": value }))
        .collect();
    json!({ "type": "FactSet", "facts": facts })
}

fn images(candidate: &Candidate) -> Value {
    match &candidate.profile_picture {
        Some(url) => json!([{ "url": url }]),
        None => json!([]),
    }
}

fn candidate_details(c: &Candidate) -> Card {
    let mut body = vec![
        json!({ "type": "TextBlock", "text": c.name, "size": "large", "weight": "bolder" }),
        json!({ "type": "TextBlock", "text": c.current_role, "isSubtle": true, "spacing": "none" }),
        facts(&[
            ("Stage:", c.stage.clone()),
            ("Position applied:", c.req_id.clone()),
            ("Location:", c.location.clone()),
            ("Experience:", format!("{} years", c.years_experience)),
        ]),
    ];
    if let Some(summary) = &c.summary {
        body.push(json!({ "type": "TextBlock", "text": summary, "wrap": true }));
    }
    adaptive(
        Value::Array(body),
        json!([{
            "type": "Action.Submit",
            "title": "Top candidates for this position",
            "data": { "msteams": { "type": "messageBack", "text": format!("top candidates {}", c.req_id) } },
        }]),
    )
}

/// Summary with a button that sends the candidate back as a `candidate details` payload.
fn candidate_summary(c: &Candidate) -> Card {
    let value = serde_json::to_value(c).unwrap_or(Value::Null);
    thumbnail(json!({
        "title": c.name,
        "subtitle": c.current_role,
        "text": format!("{} · {}", c.stage, c.location),
        "images": images(c),
        "buttons": [{
            "type": "messageBack",
            "title": "Details",
            "text": "candidate details",
            "displayText": format!("candidate details {}", c.name),
            "value": value,
        }],
    }))
}

fn candidate_preview(c: &Candidate) -> Card {
    thumbnail(json!({
        "title": c.name,
        "text": c.current_role,
        "images": images(c),
    }))
}

fn position_thumbnail(p: &OpenPosition, with_actions: bool) -> Card {
    let buttons = if with_actions {
        json!([{
            "type": "messageBack",
            "title": "Top candidates",
            "text": format!("top candidates {}", p.req_id),
            "displayText": format!("top candidates {}", p.req_id),
        }])
    } else {
        json!([])
    };
    thumbnail(json!({
        "title": format!("{} ({})", p.title, p.req_id),
        "subtitle": format!("Level {} · {}", p.level, p.location),
        "text": format!("{} applicants · open {} days · {}", p.applicants, p.days_open, p.hiring_manager),
        "buttons": buttons,
    }))
}

fn position_details(p: &OpenPosition) -> Card {
    adaptive(
        json!([
            { "type": "TextBlock", "text": p.title, "size": "large", "weight": "bolder" },
            facts(&[
                ("Req ID:", p.req_id.clone()),
                ("Level:", p.level.to_string()),
                ("Location:", p.location.clone()),
                ("Hiring manager:", p.hiring_manager.clone()),
                ("Created by:", p.created_by.clone().unwrap_or_default()),
            ]),
        ]),
        json!([]),
    )
}

fn posting_form(locations: &[&str]) -> Card {
    let choices: Vec<Value> = locations
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "title": name, "value": i.to_string() }))
        .collect();
    adaptive(
        json!([
            { "type": "TextBlock", "text": "Create a new job posting", "size": "large", "weight": "bolder" },
            { "type": "Input.Text", "id": "jobTitle", "placeholder": "Job title" },
            { "type": "Input.Number", "id": "jobLevel", "placeholder": "Level", "min": 1, "max": 100 },
            { "type": "Input.ChoiceSet", "id": "jobLocation", "style": "compact", "value": "0", "choices": choices },
        ]),
        json!([{
            "type": "Action.Submit",
            "title": "Create posting",
            "data": { "command": "createPosting" },
        }]),
    )
}

fn posting_actions(details_url: &str) -> Card {
    thumbnail(json!({
        "buttons": [
            { "type": "openUrl", "title": "View details", "value": details_url },
            {
                "type": "messageBack",
                "title": "Add new job posting",
                "text": "new job posting",
                "displayText": "New job posting",
            },
        ],
    }))
}

fn sign_in(connection_name: &str) -> Card {
    Card {
        content_type: OAUTH.to_string(),
        content: json!({
            "text": "Please sign in to continue.",
            "connectionName": connection_name,
            "buttons": [{ "type": "signin", "title": "Sign in" }],
        }),
        preview: None,
    }
}
