//! Prompt framing for the narrator.

/// Wrap a player's line in the game-master instructions.
pub fn game_master_prompt(player_input: &str) -> String {
    format!(
        r#"You are a Game Master narrating an adventure game. The player just said: "{}"

Respond in character as the narrator. Set the scene and give the player clear choices.
Keep your response under 3 sentences.
Make it engaging and focused on advancing the story."#,
        player_input
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_quotes_player_input() {
        let prompt = game_master_prompt("I light the lantern");
        assert!(prompt.contains(r#"The player just said: "I light the lantern""#));
        assert!(prompt.contains("under 3 sentences"));
    }
}
