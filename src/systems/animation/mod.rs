//! Field-level tweening for menu nodes.
//!
//! `AnimatedNode` is pure mutable state. Everything else in the shell
//! requests changes through `TweenQueue`; once a request is applied, the
//! systems here are the only writers of the animated fields. At most one
//! tween is in flight per field, so scheduling a new request for a field
//! supersedes the previous one.
use std::time::Duration;

use bevy::prelude::*;
use enum_map::{Enum, EnumMap};

pub struct AnimationPlugin;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct AnimationSystems;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TweenQueue>().add_systems(
            Update,
            (apply_tween_requests, advance_tweens)
                .chain()
                .in_set(AnimationSystems),
        );
    }
}

/// Animatable visual state of one list entry or one category tab.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatedNode {
    pub alpha: f32,
    pub label_alpha: f32,
    pub zoom: f32,
    pub x: f32,
    pub y: f32,
}

impl AnimatedNode {
    pub fn get(&self, field: NodeField) -> f32 {
        match field {
            NodeField::Alpha => self.alpha,
            NodeField::LabelAlpha => self.label_alpha,
            NodeField::Zoom => self.zoom,
            NodeField::X => self.x,
            NodeField::Y => self.y,
        }
    }

    pub fn set(&mut self, field: NodeField, value: f32) {
        match field {
            NodeField::Alpha => self.alpha = value,
            NodeField::LabelAlpha => self.label_alpha = value,
            NodeField::Zoom => self.zoom = value,
            NodeField::X => self.x = value,
            NodeField::Y => self.y = value,
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeField {
    Alpha,
    LabelAlpha,
    Zoom,
    X,
    Y,
}

#[derive(Clone, Debug)]
struct Tween {
    start: f32,
    end: f32,
    ease: EaseFunction,
    timer: Timer,
}

/// Per-field in-flight tween storage. One slot per field keeps the
/// last-write-wins supersession rule structural.
#[derive(Component, Default)]
pub struct NodeTweens {
    fields: EnumMap<NodeField, Option<Tween>>,
}

impl NodeTweens {
    pub fn is_idle(&self) -> bool {
        self.fields.values().all(Option::is_none)
    }

    /// End value of the pending tween for `field`, if any.
    pub fn target(&self, field: NodeField) -> Option<f32> {
        self.fields[field].as_ref().map(|tween| tween.end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenRequest {
    pub target: Entity,
    pub field: NodeField,
    /// Seeds the field before the tween starts. `None` animates from the
    /// field's current value.
    pub start: Option<f32>,
    pub end: f32,
    pub duration: Duration,
    pub ease: EaseFunction,
}

/// Intake for animation requests. Drained once per frame, before tweens
/// advance, so that a request issued during navigation is visible the same
/// frame.
#[derive(Resource, Default)]
pub struct TweenQueue {
    requests: Vec<TweenRequest>,
}

impl TweenQueue {
    pub fn animate(
        &mut self,
        target: Entity,
        field: NodeField,
        end: f32,
        duration: Duration,
        ease: EaseFunction,
    ) {
        self.requests.push(TweenRequest {
            target,
            field,
            start: None,
            end,
            duration,
            ease,
        });
    }

    pub fn animate_from(
        &mut self,
        target: Entity,
        field: NodeField,
        start: f32,
        end: f32,
        duration: Duration,
        ease: EaseFunction,
    ) {
        self.requests.push(TweenRequest {
            target,
            field,
            start: Some(start),
            end,
            duration,
            ease,
        });
    }

    /// Instantaneous set, still routed through the scheduler so nothing
    /// else ever writes animated fields directly.
    pub fn set_now(&mut self, target: Entity, field: NodeField, value: f32) {
        self.requests.push(TweenRequest {
            target,
            field,
            start: Some(value),
            end: value,
            duration: Duration::ZERO,
            ease: EaseFunction::Linear,
        });
    }

    pub fn requests(&self) -> &[TweenRequest] {
        &self.requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

pub fn apply_tween_requests(
    mut queue: ResMut<TweenQueue>,
    mut nodes: Query<(&mut AnimatedNode, &mut NodeTweens)>,
) {
    for request in queue.requests.drain(..) {
        // Requests against despawned or non-animated entities are dropped;
        // a skipped animation must never block navigation.
        let Ok((mut node, mut tweens)) = nodes.get_mut(request.target) else {
            continue;
        };

        if let Some(start) = request.start {
            node.set(request.field, start);
        }

        if request.duration.is_zero() {
            node.set(request.field, request.end);
            tweens.fields[request.field] = None;
            continue;
        }

        let start = node.get(request.field);
        tweens.fields[request.field] = Some(Tween {
            start,
            end: request.end,
            ease: request.ease,
            timer: Timer::new(request.duration, TimerMode::Once),
        });
    }
}

pub fn advance_tweens(time: Res<Time>, mut nodes: Query<(&mut AnimatedNode, &mut NodeTweens)>) {
    let delta = time.delta();

    for (mut node, mut tweens) in nodes.iter_mut() {
        for (field, slot) in tweens.fields.iter_mut() {
            let Some(tween) = slot.as_mut() else {
                continue;
            };

            tween.timer.tick(delta);

            if tween.timer.is_finished() {
                node.set(field, tween.end);
                *slot = None;
                continue;
            }

            let eased = EasingCurve::new(tween.start, tween.end, tween.ease)
                .sample_clamped(tween.timer.fraction());
            node.set(field, eased);
        }
    }
}
