use bevy::prelude::*;

mod data;
mod systems;

use systems::ui::menu::ShellPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Crossbar Shell".to_owned(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ShellPlugin)
        .run();
}
