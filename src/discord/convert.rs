//! Conversions between serenity models and the bot's own types.

use crate::platform::{ButtonRow, ButtonStyle, Embed, OutgoingMessage};
use crate::types::event::{ButtonPress, IncomingMessage, InteractionRef, Requester};
use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage,
};
use serenity::model::application::{
    ButtonStyle as SerenityButtonStyle, ComponentInteraction, ComponentInteractionDataKind,
};
use serenity::model::channel::Message;
use serenity::model::user::User;
use serenity::model::Timestamp;

pub fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(ref title) = embed.title {
        builder = builder.title(title);
    }
    if let Some(ref desc) = embed.description {
        builder = builder.description(desc);
    }
    if let Some(color) = embed.color {
        builder = builder.color(color);
    }
    if let Some(ref thumbnail) = embed.thumbnail {
        builder = builder.thumbnail(thumbnail);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    if let Some(ref footer) = embed.footer {
        let mut f = CreateEmbedFooter::new(&footer.text);
        if let Some(ref icon) = footer.icon_url {
            f = f.icon_url(icon);
        }
        builder = builder.footer(f);
    }
    if let Some(ts) = embed.timestamp {
        if let Ok(timestamp) = Timestamp::from_unix_timestamp(ts.timestamp()) {
            builder = builder.timestamp(timestamp);
        }
    }
    builder
}

pub fn build_action_rows(rows: &[ButtonRow]) -> Vec<CreateActionRow> {
    rows.iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            let buttons = row
                .iter()
                .map(|button| {
                    let style = match button.style {
                        ButtonStyle::Primary => SerenityButtonStyle::Primary,
                        ButtonStyle::Success => SerenityButtonStyle::Success,
                    };
                    CreateButton::new(&button.custom_id)
                        .label(&button.label)
                        .style(style)
                })
                .collect();
            CreateActionRow::Buttons(buttons)
        })
        .collect()
}

pub fn create_message(message: &OutgoingMessage) -> CreateMessage {
    let mut builder = CreateMessage::new();
    if let Some(ref content) = message.content {
        builder = builder.content(content);
    }
    if !message.embeds.is_empty() {
        builder = builder.embeds(message.embeds.iter().map(build_embed).collect());
    }
    if !message.components.is_empty() {
        builder = builder.components(build_action_rows(&message.components));
    }
    builder
}

/// Edits replace embeds and components wholesale so the prompt keeps its buttons.
pub fn edit_message(message: &OutgoingMessage) -> EditMessage {
    let mut builder = EditMessage::new()
        .embeds(message.embeds.iter().map(build_embed).collect())
        .components(build_action_rows(&message.components));
    if let Some(ref content) = message.content {
        builder = builder.content(content);
    }
    builder
}

pub fn requester(user: &User) -> Requester {
    Requester {
        id: user.id,
        name: user.name.clone(),
        tag: user.tag(),
        avatar_url: user.face(),
    }
}

pub fn incoming_message(msg: &Message) -> IncomingMessage {
    IncomingMessage {
        id: msg.id,
        channel_id: msg.channel_id,
        guild_id: msg.guild_id,
        author: requester(&msg.author),
        content: msg.content.clone(),
        is_bot: msg.author.bot,
    }
}

/// Only button clicks become [`ButtonPress`]es; select menus are ignored.
pub fn button_press(interaction: &ComponentInteraction) -> Option<ButtonPress> {
    if !matches!(interaction.data.kind, ComponentInteractionDataKind::Button) {
        return None;
    }
    Some(ButtonPress {
        interaction: InteractionRef {
            id: interaction.id,
            token: interaction.token.clone(),
        },
        custom_id: interaction.data.custom_id.clone(),
        user: requester(&interaction.user),
        channel_id: interaction.channel_id,
        guild_id: interaction.guild_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Button, EmbedField, EmbedFooter};

    fn sample_embed() -> Embed {
        Embed {
            title: Some("🎲 D&D Dice Roller".to_string()),
            description: Some("Select a die to roll from below:".to_string()),
            color: Some(0x9B59B6),
            footer: Some(EmbedFooter::with_icon("Requested by gandalf", "https://cdn.example/a.png")),
            fields: vec![EmbedField::new("Note:", "rope")],
            ..Embed::default()
        }
    }

    #[test]
    fn test_build_embed_carries_fields() {
        let json = serde_json::to_value(build_embed(&sample_embed())).unwrap();
        assert_eq!(json["title"], "🎲 D&D Dice Roller");
        assert_eq!(json["description"], "Select a die to roll from below:");
        assert_eq!(json["color"], 0x9B59B6);
        assert_eq!(json["footer"]["text"], "Requested by gandalf");
        assert_eq!(json["fields"][0]["name"], "Note:");
    }

    #[test]
    fn test_build_action_rows() {
        let rows = vec![
            vec![
                Button {
                    custom_id: "d4".to_string(),
                    label: "Roll d4".to_string(),
                    style: ButtonStyle::Primary,
                },
                Button {
                    custom_id: "d6".to_string(),
                    label: "Roll d6".to_string(),
                    style: ButtonStyle::Primary,
                },
            ],
            vec![],
        ];

        let built = build_action_rows(&rows);
        assert_eq!(built.len(), 1);
        assert!(matches!(&built[0], CreateActionRow::Buttons(buttons) if buttons.len() == 2));
    }
}
