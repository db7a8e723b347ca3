//! Server-side HTML for the interview page.
//!
//! Left panel: candidate details and tech stack. Right panel: progress, the current
//! question, and the chat history. The End Interview control is always rendered.

use std::fmt::Write;

use uuid::Uuid;

use crate::interview::models::{CandidateProfile, Role};
use crate::interview::session::{InterviewSession, Notice, Stage};

const STYLE: &str = r#"
body { background-color: #f5f7fa; font-family: sans-serif; margin: 0 2rem; }
.columns { display: flex; gap: 2rem; }
.left { flex: 1; } .right { flex: 2; }
label { display: block; margin-top: 0.5rem; }
input, textarea { width: 100%; border-radius: 8px; padding: 8px; font-size: 16px; border: 1px solid #1E90FF; box-sizing: border-box; }
button { width: 100%; padding: 10px; margin-top: 0.75rem; font-size: 16px; border-radius: 8px; background-color: #1E90FF; color: white; border: none; }
button:hover { background-color: #0073e6; }
progress { width: 100%; height: 1rem; }
.success { background: #e6f4ea; padding: 8px; border-radius: 8px; margin: 4px 0; }
.warning { background: #fff4e5; padding: 8px; border-radius: 8px; margin: 4px 0; }
.info { background: #eaf2ff; padding: 10px; border-radius: 8px; }
.chat-box { border-radius: 10px; padding: 15px; margin: 10px 0; box-shadow: 0px 2px 4px rgba(0, 0, 0, 0.1); }
.bot-message { background-color: #1E90FF; color: white; }
.user-message { background-color: #333333; color: white; }
"#;

/// Escapes text for HTML element and attribute contexts.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn notice_html(notice: &Notice) -> String {
    match notice {
        Notice::Success(msg) => format!("<div class=\"success\">{}</div>", escape(msg)),
        Notice::Warning(msg) => format!("<div class=\"warning\">{}</div>", escape(msg)),
    }
}

fn profile_form(id: Uuid) -> String {
    format!(
        r#"<form method="post" action="/sessions/{id}/profile">
<label>Full Name <input type="text" name="name"></label>
<label>Email Address <input type="text" name="email"></label>
<label>Phone Number <input type="text" name="phone"></label>
<label>Years of Experience <input type="number" name="experience" min="0" step="1" value="0" required></label>
<label>Desired Position <input type="text" name="position"></label>
<button type="submit">Submit Details</button>
</form>"#
    )
}

fn profile_summary(profile: &CandidateProfile) -> String {
    [
        format!("Name: {}", escape(&profile.name)),
        format!("Email: {}", escape(&profile.email)),
        format!("Phone: {}", escape(&profile.phone)),
        format!("Position: {}", escape(&profile.position)),
        format!("Experience: {} years", profile.experience),
    ]
    .iter()
    .map(|line| format!("<div class=\"success\">{line}</div>"))
    .collect::<Vec<_>>()
    .join("\n")
}

fn tech_stack_form(id: Uuid) -> String {
    format!(
        r#"<h2>Enter Your Tech Stack</h2>
<form method="post" action="/sessions/{id}/tech-stack">
<label>Tech Stack (Comma-Separated, e.g., Python, Django, AWS) <input type="text" name="tech_stack"></label>
<button type="submit">Submit Tech Stack</button>
</form>"#
    )
}

fn left_panel(id: Uuid, session: &InterviewSession) -> String {
    let mut html = String::from("<h2>Candidate Details</h2>\n");
    match &session.candidate {
        None => html.push_str(&profile_form(id)),
        Some(profile) => {
            html.push_str(&profile_summary(profile));
            if session.stage() == Stage::TechStack {
                html.push('\n');
                html.push_str(&tech_stack_form(id));
            }
        }
    }
    html
}

fn right_panel(id: Uuid, session: &InterviewSession) -> String {
    let mut html = String::from("<h2>Technical Interview</h2>\n");

    if session.questions.is_some() {
        let total = session.total_questions();
        let _ = writeln!(
            html,
            "<progress max=\"100\" value=\"{pct}\">{pct}%</progress>",
            pct = session.progress_percent()
        );

        if let Some(question) = session.current_question() {
            let _ = write!(
                html,
                r#"<h3>Question {number}/{total}</h3>
<div class="info">{question}</div>
<form method="post" action="/sessions/{id}/answer">
<label>Your Answer <textarea name="answer" rows="6"></textarea></label>
<button type="submit">Submit Answer</button>
</form>
"#,
                number = session.current_index + 1,
                question = escape(question),
            );
        } else if total == 0 {
            html.push_str("<div class=\"info\">No questions were generated for this interview.</div>\n");
        } else {
            html.push_str("<div class=\"info\">All questions answered.</div>\n");
        }
    }

    html.push_str("<h2>Chat History</h2>\n");
    for entry in &session.chat_history {
        let class = match entry.role {
            Role::Bot => "bot-message",
            Role::User => "user-message",
        };
        let _ = writeln!(
            html,
            "<div class=\"chat-box {class}\"><b>{role}:</b> {text}</div>",
            role = entry.role,
            text = escape(&entry.text),
        );
    }
    html
}

/// Renders the full interview page for one session.
pub fn render_page(id: Uuid, session: &InterviewSession, notice: Option<&Notice>) -> String {
    let notice = notice.map(notice_html).unwrap_or_default();
    let body = format!(
        r#"<h1>AI Hiring Assistant</h1>
{notice}
<div class="columns">
<div class="left">
{left}
</div>
<div class="right">
{right}
</div>
</div>
<form method="post" action="/sessions/{id}/end">
<button type="submit">End Interview</button>
</form>"#,
        left = left_panel(id, session),
        right = right_panel(id, session),
    );
    layout("AI Hiring Assistant", &body)
}

/// Minimal error page with a way back into the interview.
pub fn render_error(message: &str, back: Option<Uuid>) -> String {
    let link = match back {
        Some(id) => format!("/sessions/{id}"),
        None => "/".to_string(),
    };
    let body = format!(
        "<h1>Something went wrong</h1>\n<div class=\"warning\">{}</div>\n<p><a href=\"{link}\">Back to the interview</a></p>",
        escape(message)
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::ProfileInput;
    use crate::interview::session::{reduce, Action};

    fn step(session: InterviewSession, action: Action) -> InterviewSession {
        reduce(session, action).unwrap().session
    }

    fn with_profile() -> InterviewSession {
        step(
            InterviewSession::default(),
            Action::SubmitProfile(ProfileInput {
                name: "<script>alert(1)</script>".into(),
                email: "a@b.c".into(),
                phone: "1".into(),
                experience: 4,
                position: "Dev".into(),
            }),
        )
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_fresh_session_shows_profile_form_and_end_button() {
        let id = Uuid::nil();
        let html = render_page(id, &InterviewSession::default(), None);
        assert!(html.contains(&format!("action=\"/sessions/{id}/profile\"")));
        assert!(html.contains("End Interview"));
        assert!(html.contains(r#"name="experience" min="0" step="1" value="0" required"#));
        assert!(!html.contains("tech-stack"));
        assert!(!html.contains("<progress"));
    }

    #[test]
    fn test_profile_is_escaped_and_stack_form_revealed() {
        let html = render_page(Uuid::nil(), &with_profile(), None);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Experience: 4 years"));
        assert!(html.contains("/tech-stack"));
    }

    #[test]
    fn test_question_numbering_is_one_based() {
        let s = step(with_profile(), Action::SubmitTechStack("Go".into()));
        let s = step(s, Action::QuestionsGenerated("1. First?\n2. Second?".into()));
        let html = render_page(Uuid::nil(), &s, None);
        assert!(html.contains("Question 1/2"));
        assert!(html.contains("<div class=\"info\">1. First?</div>"));
        assert!(html.contains("value=\"0\""));

        let s = step(s, Action::SubmitAnswer("Because <b>".into()));
        let html = render_page(Uuid::nil(), &s, None);
        assert!(html.contains("Question 2/2"));
        assert!(html.contains("<b>User:</b> Because &lt;b&gt;"));
        assert!(html.contains("<b>Bot:</b> 1. First?"));
    }

    #[test]
    fn test_zero_questions_shows_full_progress() {
        let s = step(with_profile(), Action::SubmitTechStack("".into()));
        let s = step(s, Action::QuestionsGenerated("nothing numbered".into()));
        let html = render_page(Uuid::nil(), &s, None);
        assert!(html.contains("<progress max=\"100\" value=\"100\">"));
        assert!(html.contains("No questions were generated"));
        assert!(!html.contains("/answer"));
    }

    #[test]
    fn test_notice_is_rendered() {
        let html = render_page(
            Uuid::nil(),
            &InterviewSession::default(),
            Some(&Notice::Warning("Please provide an answer before submitting.".into())),
        );
        assert!(html.contains("<div class=\"warning\">Please provide an answer before submitting.</div>"));
    }

    #[test]
    fn test_error_page_links_back() {
        let id = Uuid::nil();
        let html = render_error("nope", Some(id));
        assert!(html.contains(&format!("href=\"/sessions/{id}\"")));
    }
}
