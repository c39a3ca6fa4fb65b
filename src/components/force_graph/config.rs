//! All tunables for the canvas in one place.

use super::hit::HitConfig;
use super::physics::PhysicsConfig;
use super::scale::ScaleConfig;
use super::state::SeedConfig;
use super::theme::Theme;

/// Bundles physics, seeding, hit-testing, sizing and theme configuration.
///
/// `Default` reproduces the stock layout behavior; override individual
/// sections with struct update syntax.
#[derive(Clone, Debug, Default)]
pub struct ForceGraphConfig {
	pub physics: PhysicsConfig,
	pub seed: SeedConfig,
	pub hit: HitConfig,
	pub scale: ScaleConfig,
	pub theme: Theme,
}
