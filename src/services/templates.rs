//! HTML template for the credentials email.
//!
//! Applicant-controlled values are escaped before interpolation; the plain
//! text alternative is derived from the rendered HTML.

use crate::constants::email::TEXT_WRAP_COLUMNS;
use crate::models::account::Account;

pub const CREDENTIALS_SUBJECT: &str = "Your Vaniloom Beta Account is Ready!";

#[must_use]
pub fn credentials_email_html(name: &str, account: &Account, signin_url: &str) -> String {
    let name = html_escape::encode_text(name);
    let username = html_escape::encode_text(&account.username);
    let password = html_escape::encode_text(&account.password);
    let signin_url = html_escape::encode_double_quoted_attribute(signin_url);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Your Vaniloom Beta Account</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; color: #1f2937; background-color: #f9fafb; }}
.container {{ max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; }}
.header {{ background: #667eea; color: white; padding: 40px 30px; text-align: center; }}
.content {{ padding: 40px 30px; }}
.account-box {{ border: 2px solid #0ea5e9; border-radius: 12px; padding: 24px; margin: 24px 0; text-align: center; }}
.credential {{ background: #eff6ff; padding: 12px 16px; border-radius: 8px; margin: 8px 0; }}
.credential-value {{ font-family: monospace; font-weight: 600; color: #1e40af; }}
.website-link {{ display: inline-block; background: #1d4ed8; color: white; padding: 12px 24px; text-decoration: none; border-radius: 8px; font-weight: 600; margin: 20px 0; }}
.instructions {{ background: #fef3c7; border-left: 4px solid #f59e0b; padding: 16px; margin: 24px 0; }}
.footer {{ background: #f8fafc; padding: 30px; text-align: center; color: #6b7280; font-size: 14px; }}
</style>
</head>
<body>
<div class="container">
  <div class="header">
    <h1>Welcome to Vaniloom Beta!</h1>
    <p>Your personalized fanfiction platform account is ready</p>
  </div>
  <div class="content">
    <p>Hi {name},</p>
    <p>Thank you for joining the Vaniloom beta test! We're excited to have you as part of our early community of creators and readers.</p>
    <div class="account-box">
      <h2>Your Beta Account</h2>
      <div class="credential">Username: <span class="credential-value">{username}</span></div>
      <div class="credential">Password: <span class="credential-value">{password}</span></div>
      <a href="{signin_url}" class="website-link">Start Exploring Vaniloom</a>
    </div>
    <div class="instructions">
      <h3>Getting Started</h3>
      <ul>
        <li>Use the credentials above to log in to your account</li>
        <li>Complete your profile to get personalized recommendations</li>
        <li>Explore fanfiction from your favorite fandoms</li>
        <li>Share feedback to help us improve the platform</li>
        <li>Keep your login credentials safe and don't share them</li>
      </ul>
    </div>
    <p><strong>Important:</strong> This is a beta test environment. Some features may be experimental, and we greatly value your feedback.</p>
    <p>Happy reading and creating!</p>
    <p><em>The Vaniloom Team</em></p>
  </div>
  <div class="footer">
    <p>This email was sent to you because you signed up for the Vaniloom beta test.</p>
    <p>Questions? Contact us at support@vaniloom.com</p>
  </div>
</div>
</body>
</html>
"#
    )
}

/// Plain-text alternative for clients that do not render HTML.
#[must_use]
pub fn plain_text_alternative(html: &str) -> String {
    html2text::from_read(html.as_bytes(), TEXT_WRAP_COLUMNS).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account() -> Account {
        Account {
            id: 1,
            username: "beta_user_001".to_string(),
            password: "VaniB2024!".to_string(),
            is_assigned: true,
            assigned_to: Some("x@example.com".to_string()),
            assigned_at: Some("2025-03-01T00:00:00Z".to_string()),
            created_at: "2025-03-01T00:00:00Z".to_string(),
            updated_at: "2025-03-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_html_contains_credentials_and_greeting() {
        let html = credentials_email_html("Alex", &test_account(), "https://vaniloom.com");
        assert!(html.contains("Hi Alex,"));
        assert!(html.contains("beta_user_001"));
        assert!(html.contains("VaniB2024!"));
        assert!(html.contains("https://vaniloom.com"));
    }

    #[test]
    fn test_html_escapes_applicant_name() {
        let html = credentials_email_html(
            "<script>alert(1)</script>",
            &test_account(),
            "https://vaniloom.com",
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_plain_text_alternative_keeps_credentials() {
        let html = credentials_email_html("Alex", &test_account(), "https://vaniloom.com");
        let text = plain_text_alternative(&html);
        assert!(text.contains("beta_user_001"));
        assert!(text.contains("VaniB2024!"));
        assert!(!text.contains("<div"));
    }
}
