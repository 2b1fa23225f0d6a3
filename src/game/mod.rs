pub mod aim;
pub mod animation;
pub mod components;
pub mod events;
pub mod input;
pub mod physics;
pub mod projectile;
pub mod types;
pub mod weapon;
