//! `cupboard login`, `cupboard logout` and `cupboard whoami`

use anyhow::{bail, Result};

use crate::cli::LoginArgs;
use crate::commands::open_session;
use crate::GlobalOptions;
use cupboard::auth::{Credentials, LoginStep, SessionKind};
use cupboard::util::Status;

pub fn login(args: LoginArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut session = open_session(global_opts)?;

    if let Some(token) = args.token {
        let mut credentials = Credentials::new(token);
        if let Some(refresh_token) = args.refresh_token {
            credentials = credentials.with_refresh_token(refresh_token);
        }
        if let Some(seconds) = args.expires_in {
            credentials = credentials.expires_in(seconds);
        }
        if let Some(email) = args.email {
            credentials = credentials.with_email(email);
        }

        if !session.complete_login(credentials) {
            bail!("failed to store credentials");
        }
        shell.status(Status::LoggedIn, signed_in_as(session.email()));
        shell.json_data("login", &serde_json::json!({ "email": session.email() }));
        return Ok(());
    }

    match session.login()? {
        LoginStep::Complete => {
            shell.status(Status::LoggedIn, signed_in_as(session.email()));
            shell.json_data("login", &serde_json::json!({ "email": session.email() }));
        }
        LoginStep::Redirect(url) => {
            shell.status(Status::Redirect, &url);
            shell.note("then run `cupboard login --token <ACCESS_TOKEN>` with the token you receive");
            shell.json_data("login", &serde_json::json!({ "authorize_url": url.as_str() }));
        }
    }
    Ok(())
}

pub fn logout(global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let mut session = open_session(global_opts)?;

    let url = session.logout()?;
    shell.status(Status::LoggedOut, session.kind());
    if let Some(url) = &url {
        shell.note(format!("to end the provider session too, open {}", url));
    }
    if session.kind() == SessionKind::Mock {
        shell.warn("the offline backend signs in again on the next command");
    }
    shell.json_data(
        "logout",
        &serde_json::json!({ "logout_url": url.as_ref().map(|u| u.as_str()) }),
    );
    Ok(())
}

pub fn whoami(global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let session = open_session(global_opts)?;

    let email = session.email();
    shell.json_data(
        "whoami",
        &serde_json::json!({
            "kind": session.kind().as_str(),
            "authenticated": session.is_authenticated(),
            "email": email,
        }),
    );

    shell.print(format!("backend: {}", session.kind()));
    if session.is_authenticated() {
        shell.print(format!("user:    {}", email.as_deref().unwrap_or("(unknown)")));
    } else {
        shell.print("user:    not logged in");
    }
    if shell.is_verbose() {
        let ctx = &global_opts.ctx;
        shell.print(format!("home:    {}", ctx.home().display()));
        shell.print(format!("config:  {}", ctx.config_path().display()));
        shell.print(format!("state:   {}", ctx.state_dir().display()));
    }
    Ok(())
}

fn signed_in_as(email: Option<String>) -> String {
    match email {
        Some(email) => format!("as {}", email),
        None => "successfully".to_string(),
    }
}
