//! Gameplay constants.
//!
//! Units: world pixels, seconds, pixels/second and pixels/second². Every
//! field has a default, so a JSON override only needs the values it changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // -- World --
    /// Downward acceleration.
    pub gravity: f32,
    /// Slack (in pixels) allowed above a platform top when deciding a body
    /// was above it last step. Tunable, not a contract.
    pub landing_slack: f32,
    /// Distance below the level bottom at which a falling player dies.
    pub fall_margin: f32,
    /// Extra band around the viewport in which enemies are still simulated.
    pub on_screen_margin: f32,
    /// Distance behind the camera's left edge at which enemies despawn.
    pub despawn_margin: f32,
    /// Dead zone width on each side, as a fraction of the viewport width.
    pub dead_zone_fraction: f32,
    /// Pause between touching the flag and loading the next level.
    pub level_transition_delay: f32,

    // -- Player --
    pub player_width: f32,
    pub player_height: f32,
    pub max_health: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Vertical velocity applied on jump (negative is up).
    pub jump_impulse: f32,
    /// Continuous hold time after which walking becomes running.
    pub walk_to_run_time: f32,
    /// Time after releasing a direction during which the walk clip stays on.
    pub walk_grace: f32,
    pub attack_cooldown: f32,
    /// Fallback that force-clears an attack whose clip never reported its end.
    pub attack_timeout: f32,
    pub attack_damage: f32,
    /// Hitbox size as a fraction of the player size.
    pub hitbox_scale: f32,
    pub invincibility_duration: f32,

    // -- Enemies --
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_health: f32,
    pub contact_damage: f32,
    pub hop_impulse: f32,
    pub hop_speed: f32,
    pub hop_interval_min: f32,
    pub hop_interval_max: f32,

    // -- Pickups --
    pub heal_amount: f32,
    pub boost_duration: f32,
    pub boost_multiplier: f32,
    pub spike_damage: f32,
    pub water_damage: f32,

    // -- Special attack --
    pub special_kill_cost: u32,
    pub projectile_size: f32,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2520.0,
            landing_slack: 1.0,
            fall_margin: 100.0,
            on_screen_margin: 200.0,
            despawn_margin: 600.0,
            dead_zone_fraction: 1.0 / 3.0,
            level_transition_delay: 1.0,

            player_width: 120.0,
            player_height: 120.0,
            max_health: 100.0,
            walk_speed: 240.0,
            run_speed: 420.0,
            jump_impulse: -1080.0,
            walk_to_run_time: 1.0,
            walk_grace: 0.5,
            attack_cooldown: 0.5,
            attack_timeout: 1.0,
            attack_damage: 50.0,
            hitbox_scale: 0.8,
            invincibility_duration: 1.5,

            enemy_width: 50.0,
            enemy_height: 64.0,
            enemy_health: 100.0,
            contact_damage: 10.0,
            hop_impulse: -600.0,
            hop_speed: 120.0,
            hop_interval_min: 1.0,
            hop_interval_max: 2.0,

            heal_amount: 50.0,
            boost_duration: 10.0,
            boost_multiplier: 1.5,
            spike_damage: 50.0,
            water_damage: 20.0,

            special_kill_cost: 5,
            projectile_size: 64.0,
            projectile_speed: 720.0,
            projectile_damage: 100.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1000.0, "max_health": 5.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 1000.0);
        assert_eq!(tuning.max_health, 5.0);
        assert_eq!(tuning.walk_speed, Tuning::default().walk_speed);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }

    #[test]
    fn defaults_are_consistent() {
        let t = Tuning::default();
        assert!(t.run_speed > t.walk_speed);
        assert!(t.jump_impulse < 0.0);
        assert!(t.hop_interval_max > t.hop_interval_min);
        assert!(t.attack_timeout > 0.0);
    }
}
