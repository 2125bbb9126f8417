//! Default node catalog and rarity table shipped with the game.
//!
//! Eight kinds of harvestable spread over the five categories: a loose
//! stone, an ore vein, an oak, a berry bush, wildflowers, a mushroom patch,
//! a beach shell, and a fallen meteor.

use rust_decimal::Decimal;

use forage_types::{
    DropConditions, DropEntry, NodeCategory, NodeDefinition, NodeId, RespawnPolicy, Season,
    ToolType, Weather,
};

use crate::catalog::NodeCatalog;
use crate::error::WorldError;
use crate::rarity::RarityTable;

/// Node ids of the starting catalog, for hosts that place instances by kind.
pub mod nodes {
    /// Loose stone picked up by hand.
    pub const ROCK_STONE: &str = "node_rock_stone";
    /// Ore vein broken with a pickaxe.
    pub const ROCK_ORE: &str = "node_rock_ore";
    /// Oak tree felled with an axe.
    pub const TREE_OAK: &str = "node_tree_oak";
    /// Berry bush picked once a day.
    pub const BUSH_BERRY: &str = "node_bush_berry";
    /// Wildflower patch picked once a day.
    pub const FLOWER_WILD: &str = "node_flower_wild";
    /// Mushroom patch dug with a shovel.
    pub const MUSHROOM_PATCH: &str = "node_mushroom_patch";
    /// Shell on the beach.
    pub const BEACH_SHELL: &str = "node_beach_shell";
    /// Fallen meteor, rare special node.
    pub const SPECIAL_METEOR: &str = "node_special_meteor";
}

/// Golden item ids; their rolled quantities are doubled.
pub const GOLDEN_ITEMS: &[&str] = &["황금 원석", "황금 도토리", "황금 버섯", "황금 조개", "황금 별"];

fn pct(value: u32) -> Decimal {
    Decimal::from(value)
}

#[allow(clippy::too_many_arguments)]
fn define(
    id: &str,
    name: &str,
    category: NodeCategory,
    required_tool: ToolType,
    respawn: RespawnPolicy,
    xp_reward: u32,
    base_drops: Vec<DropEntry>,
    bonus_drops: Vec<DropEntry>,
    has_bonus_round: bool,
) -> NodeDefinition {
    NodeDefinition {
        node_id: NodeId::from(id),
        display_name: name.to_owned(),
        category,
        required_tool,
        respawn,
        xp_reward,
        base_drops,
        bonus_drops,
        has_bonus_round,
    }
}

/// Every node in the starting catalog.
#[allow(clippy::too_many_lines)]
pub fn starting_nodes() -> Vec<NodeDefinition> {
    vec![
        define(
            nodes::ROCK_STONE,
            "돌멩이",
            NodeCategory::Mineral,
            ToolType::Hand,
            RespawnPolicy::Time { minutes: 60 },
            5,
            vec![DropEntry::guaranteed("돌", 2, 4)],
            vec![DropEntry::with_chance("석탄", 1, 1, pct(10))],
            false,
        ),
        define(
            nodes::ROCK_ORE,
            "광맥",
            NodeCategory::Mineral,
            ToolType::Pickaxe,
            RespawnPolicy::Time { minutes: 180 },
            12,
            vec![
                DropEntry::guaranteed("돌", 1, 2),
                DropEntry::guaranteed("철광석", 1, 3),
            ],
            vec![
                DropEntry::with_chance("금광석", 1, 2, pct(6)).when(DropConditions {
                    requires_bonus_success: true,
                    min_tool_grade: Some(2),
                    ..DropConditions::default()
                }),
                DropEntry::with_chance("자수정", 1, 1, pct(3)).when(DropConditions {
                    min_skill_level: Some(5),
                    ..DropConditions::default()
                }),
                DropEntry::with_chance("황금 원석", 1, 1, pct(1)).requiring_bonus(),
            ],
            true,
        ),
        define(
            nodes::TREE_OAK,
            "참나무",
            NodeCategory::Wood,
            ToolType::Axe,
            RespawnPolicy::Time { minutes: 240 },
            10,
            vec![DropEntry::guaranteed("나무", 3, 5)],
            vec![
                DropEntry::with_chance("나뭇가지", 1, 2, pct(40)),
                DropEntry::with_chance("도토리", 1, 3, pct(15)).when(DropConditions {
                    season: Some(Season::Autumn),
                    ..DropConditions::default()
                }),
                DropEntry::with_chance("황금 도토리", 1, 1, pct(2)).requiring_bonus(),
            ],
            true,
        ),
        define(
            nodes::BUSH_BERRY,
            "산딸기 덤불",
            NodeCategory::Plant,
            ToolType::Hand,
            RespawnPolicy::Daily { reset_hour: 6 },
            4,
            vec![DropEntry::guaranteed("산딸기", 1, 3)],
            vec![
                DropEntry::with_chance("블루베리", 1, 2, pct(20)).when(DropConditions {
                    season: Some(Season::Summer),
                    ..DropConditions::default()
                }),
                DropEntry::with_chance("꿀", 1, 1, pct(5)).when(DropConditions {
                    requires_first_daily_harvest: true,
                    ..DropConditions::default()
                }),
            ],
            false,
        ),
        define(
            nodes::FLOWER_WILD,
            "들꽃",
            NodeCategory::Plant,
            ToolType::Hand,
            RespawnPolicy::Daily { reset_hour: 6 },
            3,
            vec![DropEntry::guaranteed("들꽃", 1, 2)],
            vec![
                DropEntry::with_chance("네잎클로버", 1, 1, pct(2)).when(DropConditions {
                    weather: Some(Weather::Sunny),
                    ..DropConditions::default()
                }),
                DropEntry::with_chance("무지개 꽃잎", 1, 1, pct(4)).when(DropConditions {
                    event_id: Some("spring_festival".to_owned()),
                    ..DropConditions::default()
                }),
            ],
            false,
        ),
        define(
            nodes::MUSHROOM_PATCH,
            "버섯 군락",
            NodeCategory::Plant,
            ToolType::Shovel,
            RespawnPolicy::Daily { reset_hour: 5 },
            6,
            vec![DropEntry::guaranteed("버섯", 1, 2)],
            vec![
                DropEntry::with_chance("송이버섯", 1, 1, pct(10)).when(DropConditions {
                    weather: Some(Weather::Rainy),
                    ..DropConditions::default()
                }),
                DropEntry::with_chance("황금 버섯", 1, 1, pct(1)).when(DropConditions {
                    min_museum_completion: Some(50),
                    ..DropConditions::default()
                }),
            ],
            false,
        ),
        define(
            nodes::BEACH_SHELL,
            "조개",
            NodeCategory::Beach,
            ToolType::Hand,
            RespawnPolicy::Daily { reset_hour: 6 },
            4,
            vec![DropEntry::guaranteed("조개껍데기", 1, 2)],
            vec![
                DropEntry::with_chance("진주", 1, 1, pct(6)).requiring_bonus(),
                DropEntry::with_chance("황금 조개", 1, 1, pct(1)).when(DropConditions {
                    min_town_level: Some(3),
                    ..DropConditions::default()
                }),
            ],
            true,
        ),
        define(
            nodes::SPECIAL_METEOR,
            "운석",
            NodeCategory::Special,
            ToolType::Pickaxe,
            RespawnPolicy::Time { minutes: 1440 },
            50,
            vec![
                DropEntry::guaranteed("운석 조각", 1, 1),
                DropEntry::guaranteed("별가루", 0, 2),
            ],
            vec![DropEntry::with_chance("황금 별", 1, 1, pct(5)).requiring_bonus()],
            true,
        ),
    ]
}

/// Build the starting catalog and its rarity table.
///
/// # Errors
///
/// Returns [`WorldError`] if a hard-coded definition fails validation
/// (should not happen).
pub fn create_starting_catalog() -> Result<(NodeCatalog, RarityTable), WorldError> {
    let mut builder = NodeCatalog::builder();
    for definition in starting_nodes() {
        builder.define(definition)?;
    }
    let rarity = GOLDEN_ITEMS.iter().copied().collect();
    Ok((builder.build(), rarity))
}
