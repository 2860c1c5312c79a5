//! Local session commands.

use agent_pipeline_client::Session;

use super::Context;

/// Sign in and remember the session.
///
/// # Errors
///
/// Returns an error if the session file cannot be written.
pub async fn sign_in(ctx: &Context, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::sign_in(email);
    session.save(&ctx.session_file).await?;

    let Some(user) = &session.user else {
        return Err("sign-in produced no user".into());
    };
    tracing::info!(
        user_id = %user.id,
        path = %ctx.session_file.display(),
        "Signed in"
    );
    #[allow(clippy::print_stdout)]
    {
        println!("Signed in as {} ({email})", user.name);
    }
    Ok(())
}

/// Forget the stored session.
///
/// # Errors
///
/// Returns an error if the session file exists but cannot be removed.
pub async fn sign_out(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    Session::sign_out(&ctx.session_file).await?;
    tracing::info!(path = %ctx.session_file.display(), "Signed out");
    Ok(())
}
