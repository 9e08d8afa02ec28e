//! UI composition modules.
//!
//! `menu` owns the navigation/animation core of the shell; generic field
//! tweening lives in `systems::animation`.
pub mod menu;
