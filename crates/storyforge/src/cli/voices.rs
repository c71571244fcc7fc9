//! Voice listing command handler.

use storyforge::{EdgeTtsClient, StoryforgeResult, VoiceCatalog};

/// Fetch and print the TTS backend's voice catalog.
pub async fn list_voices(language: Option<&str>) -> StoryforgeResult<()> {
    let client = EdgeTtsClient::new()?;
    let mut catalog = VoiceCatalog::default();
    let voices = catalog.get(&client).await?;

    let mut shown = 0;
    for voice in &voices {
        if let Some(language) = language
            && voice.language != language
        {
            continue;
        }
        println!(
            "{:<28} {:<10} {:<8} {}",
            voice.id, voice.locale, voice.gender, voice.name
        );
        shown += 1;
    }
    println!("{} voice(s)", shown);

    Ok(())
}
