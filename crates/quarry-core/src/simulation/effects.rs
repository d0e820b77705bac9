//! Effect dispatch: turning "using" something into stat and UI changes

use quarry_materials::CraftKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::{Player, StatKind};
use crate::error::{InteractionError, InteractionResult};

/// A typed effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Open a crafting surface
    Crafting(CraftKind),
    /// Signed change to a player stat
    StatDelta(StatKind, f32),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Crafting(kind) => write!(f, "crafting {}", kind),
            Effect::StatDelta(stat, amount) => write!(f, "{} {}", stat, amount),
        }
    }
}

/// Parses symbolic effects: exactly two whitespace separated parts, the
/// category first ("crafting basic", "food 2", "health -0.5")
impl FromStr for Effect {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let undefined = || InteractionError::NoEffectDefined(s.to_string());

        let parts: Vec<&str> = s.split_whitespace().collect();
        let [category, argument] = parts.as_slice() else {
            return Err(undefined());
        };

        if *category == "crafting" {
            let kind = argument.parse::<CraftKind>().map_err(|_| undefined())?;
            return Ok(Effect::Crafting(kind));
        }

        let stat = category.parse::<StatKind>().map_err(|_| undefined())?;
        let amount = argument.parse::<f32>().map_err(|_| undefined())?;
        if !amount.is_finite() {
            return Err(undefined());
        }
        Ok(Effect::StatDelta(stat, amount))
    }
}

/// UI side of effects; whoever presents the game implements this
pub trait EffectHooks {
    /// Open the crafting surface for a craft kind
    fn open_crafting(&mut self, kind: CraftKind);
}

/// Hooks that ignore every UI request
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl EffectHooks for NoHooks {
    fn open_crafting(&mut self, _kind: CraftKind) {}
}

/// Apply an effect to the player and UI
pub fn apply(effect: &Effect, player: &mut Player, hooks: &mut dyn EffectHooks) {
    match effect {
        Effect::Crafting(kind) => {
            match kind {
                CraftKind::Basic => log::info!("[EFFECT] Can't craft much on a 2x2 grid"),
                CraftKind::CraftingTable => log::info!("[EFFECT] Crafting on a 3x3 table"),
            }
            hooks.open_crafting(*kind);
        }
        Effect::StatDelta(stat, amount) => {
            log::debug!("[EFFECT] Gaining {} {}", amount, stat);
            stat.apply(player, *amount);
        }
    }
}

/// Parse a symbolic effect and apply it
pub fn dispatch(
    symbol: &str,
    player: &mut Player,
    hooks: &mut dyn EffectHooks,
) -> InteractionResult<Effect> {
    let effect = symbol.parse::<Effect>()?;
    apply(&effect, player, hooks);
    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHooks {
        opened: Vec<CraftKind>,
    }

    impl EffectHooks for RecordingHooks {
        fn open_crafting(&mut self, kind: CraftKind) {
            self.opened.push(kind);
        }
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!(
            "crafting basic".parse::<Effect>(),
            Ok(Effect::Crafting(CraftKind::Basic))
        );
        assert_eq!(
            "crafting crafting_table".parse::<Effect>(),
            Ok(Effect::Crafting(CraftKind::CraftingTable))
        );
        assert_eq!(
            "food 2".parse::<Effect>(),
            Ok(Effect::StatDelta(StatKind::Food, 2.0))
        );
        assert_eq!(
            "health -0.5".parse::<Effect>(),
            Ok(Effect::StatDelta(StatKind::Health, -0.5))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed() {
        for symbol in ["mana 3", "food", "food 2 3", "", "crafting furnace", "food lots", "food NaN"] {
            let err = symbol.parse::<Effect>().unwrap_err();
            assert_eq!(err, InteractionError::NoEffectDefined(symbol.to_string()));
            assert!(err.is_fatal());
        }
    }

    #[test]
    fn test_food_raises_and_clamps() {
        let mut player = Player::default();
        player.food.set(10.0);
        let mut hooks = NoHooks;

        apply(&Effect::StatDelta(StatKind::Food, 2.0), &mut player, &mut hooks);
        assert_eq!(player.food.current, 12.0);

        player.food.set(19.0);
        apply(&Effect::StatDelta(StatKind::Food, 2.0), &mut player, &mut hooks);
        assert_eq!(player.food.current, 20.0);
    }

    #[test]
    fn test_crafting_opens_surface() {
        let mut player = Player::default();
        let mut hooks = RecordingHooks::default();

        dispatch("crafting basic", &mut player, &mut hooks).unwrap();
        assert_eq!(hooks.opened, vec![CraftKind::Basic]);
        assert_eq!(player.food.current, 20.0);
    }

    #[test]
    fn test_dispatch_unknown_leaves_player_untouched() {
        let mut player = Player::default();
        player.health.set(5.0);
        assert!(dispatch("mana 3", &mut player, &mut NoHooks).is_err());
        assert_eq!(player.health.current, 5.0);
    }

    #[test]
    fn test_display_round_trips() {
        let effect = Effect::StatDelta(StatKind::Health, -0.5);
        assert_eq!(effect.to_string(), "health -0.5");
        assert_eq!(effect.to_string().parse::<Effect>(), Ok(effect));
    }
}
