//! Color scheme commands.

use agent_pipeline_core::ThemeName;

use super::Context;

/// Print the stored theme and the colors it resolves to.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the client cannot be built.
pub async fn show(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = ctx.view().await?;
    view.load_theme().await;

    let tokens = view.theme();
    #[allow(clippy::print_stdout)]
    {
        println!("theme:             {}", view.session().theme.theme);
        println!("background:        {}", tokens.background);
        println!("text:              {}", tokens.text);
        println!("header color:      {}", tokens.header_color);
        println!("header text color: {}", tokens.header_text_color);
    }
    Ok(())
}

/// Store a new theme on the server and in the local session.
///
/// # Errors
///
/// Returns an error if the server rejects the change or the session cannot be saved.
pub async fn set(ctx: &Context, theme: ThemeName) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = ctx.view().await?;
    if !view.save_theme(theme).await {
        return Err(format!("could not save theme {theme}").into());
    }

    view.session().save(&ctx.session_file).await?;
    tracing::info!(%theme, "Theme updated");
    Ok(())
}
