//! OAuth authorization-code flow against Google.
//!
//! Sign-in opens the consent page in a browser and receives the redirect on
//! a localhost listener. Tokens are exchanged and refreshed directly against
//! the token endpoint with reqwest.

use anyhow::{Context, Result};
use famhub_core::session::User;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use url::Url;

use crate::config;
use crate::types::{GoogleCredentials, StoredTokens, TokenResponse, UserInfo};

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const REDIRECT_PORT: u16 = 8085;

/// Calendar for events, storage + datastore for the photo album, and the
/// OpenID scopes to learn who signed in.
const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/devstorage.read_write",
    "https://www.googleapis.com/auth/datastore",
    "openid",
    "email",
    "profile",
];

fn redirect_uri() -> String {
    format!("http://localhost:{}/callback", REDIRECT_PORT)
}

fn consent_url(creds: &GoogleCredentials, state: &str) -> Result<Url> {
    let mut url = Url::parse(AUTH_ENDPOINT)?;
    url.query_pairs_mut()
        .append_pair("client_id", &creds.client_id)
        .append_pair("redirect_uri", &redirect_uri())
        .append_pair("response_type", "code")
        .append_pair("scope", &SCOPES.join(" "))
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("state", state);
    Ok(url)
}

/// Start a local HTTP server to receive the OAuth callback
/// Returns (code, state)
fn wait_for_callback() -> Result<(String, String)> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", REDIRECT_PORT))
        .with_context(|| format!("Failed to bind to port {}", REDIRECT_PORT))?;

    eprintln!("Waiting for OAuth callback on port {}...", REDIRECT_PORT);

    let (mut stream, _) = listener.accept().context("Failed to accept connection")?;

    let mut reader = BufReader::new(&stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Parse the request to get the code and state
    // Request line looks like: GET /callback?code=xxx&state=yyy HTTP/1.1
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .context("Invalid request")?;

    let url = Url::parse(&format!("http://localhost{}", url_part))?;

    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.to_string())
        .context("No code in callback")?;

    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.to_string())
        .context("No state in callback")?;

    // Send a response to the browser
    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>Sign-in successful!</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    stream.write_all(response.as_bytes())?;
    stream.flush()?;

    Ok((code, state))
}

/// Run the full OAuth sign-in flow and store the resulting tokens.
pub async fn sign_in() -> Result<User> {
    let creds = config::load_credentials()?;

    let state = uuid::Uuid::new_v4().to_string();
    let auth_url = consent_url(&creds, &state)?;

    eprintln!("\nOpen this URL in your browser to sign in:\n");
    eprintln!("{}\n", auth_url);

    if open::that(auth_url.as_str()).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, returned_state) = wait_for_callback()?;

    if returned_state != state {
        anyhow::bail!("OAuth state mismatch; aborting sign-in");
    }

    let token_response = exchange_code(&creds, &code).await?;

    let user_info = fetch_userinfo(&token_response.access_token).await?;

    let tokens = StoredTokens {
        account: user_info.email.clone(),
        display_name: if user_info.name.is_empty() {
            None
        } else {
            Some(user_info.name.clone())
        },
        access_token: token_response.access_token,
        refresh_token: token_response.refresh_token,
        expires_at: expires_at_from(token_response.expires_in),
    };

    config::save_tokens(&tokens)?;

    Ok(User {
        email: tokens.account,
        display_name: tokens.display_name,
    })
}

/// Forget the stored tokens.
pub async fn sign_out() -> Result<()> {
    config::clear_tokens()
}

/// Get tokens for the signed-in account, refreshing if needed
pub async fn get_valid_tokens() -> Result<StoredTokens> {
    let mut tokens = config::load_tokens()?;

    if config::tokens_need_refresh(&tokens) {
        let creds = config::load_credentials()?;
        tokens = refresh(&creds, &tokens).await?;
        config::save_tokens(&tokens)?;
    }

    Ok(tokens)
}

async fn exchange_code(creds: &GoogleCredentials, code: &str) -> Result<TokenResponse> {
    let client = reqwest::Client::new();

    let response = client
        .post(TOKEN_ENDPOINT)
        .form(&[
            ("code", code),
            ("client_id", &creds.client_id),
            ("client_secret", &creds.client_secret),
            ("redirect_uri", &redirect_uri()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .context("Failed to reach the token endpoint")?
        .error_for_status()
        .context("Failed to exchange code for tokens")?;

    Ok(response.json().await?)
}

async fn refresh(creds: &GoogleCredentials, tokens: &StoredTokens) -> Result<StoredTokens> {
    let client = reqwest::Client::new();

    let response = client
        .post(TOKEN_ENDPOINT)
        .form(&[
            ("refresh_token", tokens.refresh_token.as_str()),
            ("client_id", &creds.client_id),
            ("client_secret", &creds.client_secret),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await
        .context("Failed to reach the token endpoint")?
        .error_for_status()
        .context("Failed to refresh token")?;

    let token_response: TokenResponse = response.json().await?;

    // Google typically doesn't return a new refresh_token on refresh
    let refresh_token = if token_response.refresh_token.is_empty() {
        tokens.refresh_token.clone()
    } else {
        token_response.refresh_token
    };

    Ok(StoredTokens {
        account: tokens.account.clone(),
        display_name: tokens.display_name.clone(),
        access_token: token_response.access_token,
        refresh_token,
        expires_at: expires_at_from(token_response.expires_in),
    })
}

async fn fetch_userinfo(access_token: &str) -> Result<UserInfo> {
    let client = reqwest::Client::new();

    let response = client
        .get(USERINFO_ENDPOINT)
        .bearer_auth(access_token)
        .send()
        .await
        .context("Failed to reach the userinfo endpoint")?
        .error_for_status()
        .context("Failed to fetch account info")?;

    Ok(response.json().await?)
}

fn expires_at_from(expires_in: i64) -> Option<chrono::DateTime<chrono::Utc>> {
    if expires_in > 0 {
        Some(chrono::Utc::now() + chrono::Duration::seconds(expires_in))
    } else {
        None
    }
}
