//! Built-in starter specifications.

use crate::codegen::env::EnvVarAllocator;
use crate::ir::{
    ApiProfile, AuthType, BotConfig, CommandOption, DeploymentType, FieldMapping, OptionType,
    ProjectSpec, ResponseTemplate, SlashCommand,
};

/// A starter bot offered by `botforge init`.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    build: fn(&mut EnvVarAllocator) -> (Vec<ApiProfile>, Vec<SlashCommand>),
}

impl Preset {
    /// The preset as a complete specification for `deployment`.
    pub fn spec(&self, deployment: DeploymentType) -> ProjectSpec {
        let mut allocator = EnvVarAllocator::new();
        let (api_profiles, commands) = (self.build)(&mut allocator);
        let mut bot = BotConfig::new(self.name, self.description);
        bot.deployment_type = deployment;
        ProjectSpec {
            bot,
            api_profiles,
            commands,
        }
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        id: "simple-greeting",
        name: "Greeting Bot",
        description: "Replies to greetings",
        build: greeting,
    },
    Preset {
        id: "fun-games",
        name: "Game Bot",
        description: "Dice, coin flips and fortunes",
        build: games,
    },
    Preset {
        id: "dog-images",
        name: "Dog Bot",
        description: "Random dog pictures from dog.ceo",
        build: dogs,
    },
    Preset {
        id: "joke-bot",
        name: "Joke Bot",
        description: "Tells a random joke",
        build: jokes,
    },
];

pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

fn string_option(name: &str, description: &str, required: bool) -> CommandOption {
    CommandOption {
        name: name.into(),
        description: description.into(),
        option_type: OptionType::String,
        required,
    }
}

fn profile(allocator: &mut EnvVarAllocator, id: &str, name: &str, base_url: &str) -> ApiProfile {
    let vars = allocator.allocate();
    ApiProfile {
        id: id.into(),
        name: name.into(),
        base_url: base_url.into(),
        auth_type: AuthType::None,
        api_key: None,
        api_key_name: None,
        env_var_key: vars.key,
        env_var_url: vars.url,
    }
}

fn greeting(_: &mut EnvVarAllocator) -> (Vec<ApiProfile>, Vec<SlashCommand>) {
    let commands = vec![
        SlashCommand::static_text("hello", "hello", "Say hello", "Hello, {name}! 👋")
            .with_option(string_option("name", "Who to greet", true)),
        SlashCommand::static_text("ping", "ping", "Check that the bot is alive", "Pong! 🏓"),
    ];
    (Vec::new(), commands)
}

fn games(_: &mut EnvVarAllocator) -> (Vec<ApiProfile>, Vec<SlashCommand>) {
    let commands = vec![
        SlashCommand::static_text("dice", "dice", "Roll a six-sided die", "🎲 You rolled {random(1,6)}"),
        SlashCommand::static_text("coin", "coin", "Flip a coin", r#"🪙 {random("Heads", "Tails")}"#),
        SlashCommand::static_text(
            "fortune",
            "fortune",
            "Draw today's fortune",
            r#"🔮 Today's fortune: {random("Great blessing", "Blessing", "Small blessing", "Curse")}"#,
        ),
    ];
    (Vec::new(), commands)
}

fn dogs(allocator: &mut EnvVarAllocator) -> (Vec<ApiProfile>, Vec<SlashCommand>) {
    let api = profile(allocator, "dog-ceo", "Dog CEO", "https://dog.ceo/api");
    let image = || vec![FieldMapping::new("message", "Image", "{value}")];
    let commands = vec![
        SlashCommand::api_call("dog", "dog", "Show a random dog", &api.id, "/breeds/image/random")
            .with_mappings(image()),
        SlashCommand::api_call("breed", "breed", "Show a dog of a given breed", &api.id, "/breed/{breed}/images/random")
            .with_option(string_option("breed", "Breed, for example shiba", true))
            .with_mappings(image()),
    ];
    (vec![api], commands)
}

fn jokes(allocator: &mut EnvVarAllocator) -> (Vec<ApiProfile>, Vec<SlashCommand>) {
    let api = profile(allocator, "joke-api", "Official Joke API", "https://official-joke-api.appspot.com");
    let commands = vec![SlashCommand::api_call("joke", "joke", "Tell a random joke", &api.id, "/random_joke")
        .with_mappings(vec![
            FieldMapping::new("setup", "Setup", "{value}"),
            FieldMapping::new("punchline", "Punchline", "||{value}||"),
        ])
        .with_template(ResponseTemplate::MultiLine)];
    (vec![api], commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_spec;

    #[test]
    fn presets_have_unique_ids() {
        let mut ids: Vec<_> = PRESETS.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PRESETS.len());
        assert!(find("dog-images").is_some());
        assert!(find("missing").is_none());
    }

    #[test]
    fn every_preset_validates_cleanly() {
        for preset in PRESETS {
            let spec = preset.spec(DeploymentType::Gateway);
            let warnings = validate_spec(&spec).unwrap();
            assert!(warnings.is_empty(), "{}: {:?}", preset.id, warnings);
        }
    }

    #[test]
    fn profiles_get_allocated_variables() {
        let spec = find("joke-bot").unwrap().spec(DeploymentType::InteractionsEndpoint);
        assert_eq!(spec.api_profiles[0].env_var_key, "BOT_API_KEY_01");
        assert_eq!(spec.api_profiles[0].env_var_url, "BOT_BASE_URL_01");
        assert_eq!(spec.bot.deployment_type, DeploymentType::InteractionsEndpoint);
    }
}
