//! Rigid body physics for the player, dropped items and mobs

use glam::Vec2;
use rapier2d::prelude::*;
use std::sync::{Mutex, MutexGuard};

use super::collision::{BodyTag, Contact};

/// Collects collision-start events while the pipeline steps
#[derive(Default)]
struct ContactCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl ContactCollector {
    /// Lock the event list, recovering it if the lock was poisoned
    fn started(&self) -> MutexGuard<'_, Vec<(ColliderHandle, ColliderHandle)>> {
        self.started.lock().unwrap_or_else(|poisoned| {
            log::warn!("[PHYSICS] Contact list lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn drain(&self) -> Vec<(ColliderHandle, ColliderHandle)> {
        std::mem::take(&mut *self.started())
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let CollisionEvent::Started(a, b, _) = event {
            self.started().push((a, b));
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Manages the rapier2d physics world. Pixel units, y pointing down
pub struct PhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    gravity: Vector<Real>,
    contacts: ContactCollector,
}

impl PhysicsWorld {
    /// `gravity` in px/s² (positive is down), `dt` in seconds
    pub fn new(gravity: f32, dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            gravity: vector![0.0, gravity],
            contacts: ContactCollector::default(),
        }
    }

    /// Add a static cuboid (blocks) tagged with its identity
    pub fn insert_fixed_cuboid(
        &mut self,
        centre: Vec2,
        half_extents: Vec2,
        tag: BodyTag,
        groups: InteractionGroups,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .translation(vector![centre.x, centre.y])
            .friction(0.8)
            .collision_groups(groups)
            .user_data(tag.to_user_data())
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a dynamic body with locked rotation; colliders are attached separately
    pub fn insert_dynamic_body(&mut self, position: Vec2, gravity_scale: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .gravity_scale(gravity_scale)
            .lock_rotations()
            .build();
        self.rigid_body_set.insert(body)
    }

    /// Attach a collider to a body, tagging it with the body's identity
    pub fn attach_collider(
        &mut self,
        body: RigidBodyHandle,
        mut collider: Collider,
        tag: BodyTag,
    ) -> ColliderHandle {
        collider.user_data = tag.to_user_data();
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set)
    }

    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            false,
        );
    }

    /// Remove a body along with its attached colliders
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let translation = body.translation();
            Vec2::new(translation.x, translation.y)
        })
    }

    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|body| {
            let linvel = body.linvel();
            Vec2::new(linvel.x, linvel.y)
        })
    }

    pub fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    pub fn set_collision_groups(&mut self, handle: ColliderHandle, groups: InteractionGroups) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_collision_groups(groups);
        }
    }

    pub fn collision_groups(&self, handle: ColliderHandle) -> Option<InteractionGroups> {
        self.collider_set
            .get(handle)
            .map(|collider| collider.collision_groups())
    }

    fn tag_of(&self, handle: ColliderHandle) -> Option<BodyTag> {
        self.collider_set
            .get(handle)
            .and_then(|collider| BodyTag::from_user_data(collider.user_data))
    }

    /// Advance the simulation by one tick.
    /// Returns the contacts that began during the step; colliders without a tag are skipped
    pub fn step(&mut self) -> Vec<Contact> {
        let physics_hooks = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &physics_hooks,
            &self.contacts,
        );

        self.contacts
            .drain()
            .into_iter()
            .filter_map(|(a, b)| Some(Contact::new(self.tag_of(a)?, self.tag_of(b)?)))
            .collect()
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use crate::world::collision::{groups, BodyCategory};
    use glam::IVec2;

    #[test]
    fn test_contact_collector_survives_poisoned_lock() {
        let collector = ContactCollector::default();
        let handle = ColliderHandle::from_raw_parts(1, 0);
        collector.started().push((handle, handle));

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = collector.started.lock().unwrap();
            panic!("poison the contact list");
        }));
        assert!(poisoned.is_err());
        assert!(collector.started.is_poisoned());

        collector.started().push((handle, handle));
        assert_eq!(collector.drain().len(), 2);
        assert!(collector.drain().is_empty());
    }

    #[test]
    fn test_body_falls_with_gravity() {
        let mut physics = PhysicsWorld::new(300.0, 0.015);
        let body = physics.insert_dynamic_body(Vec2::new(100.0, 100.0), 1.0);
        physics.attach_collider(
            body,
            ColliderBuilder::ball(5.0).build(),
            BodyTag::entity(BodyCategory::Item, EntityId::new()),
        );

        for _ in 0..10 {
            physics.step();
        }

        let position = physics.body_position(body).unwrap();
        assert!(position.y > 100.0, "y = {}", position.y);
        assert!(physics.body_velocity(body).unwrap().y > 0.0);
    }

    #[test]
    fn test_zero_gravity_scale_floats() {
        let mut physics = PhysicsWorld::new(300.0, 0.015);
        let body = physics.insert_dynamic_body(Vec2::new(100.0, 100.0), 0.0);
        for _ in 0..10 {
            physics.step();
        }
        assert_eq!(physics.body_position(body).unwrap(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_remove_body_drops_colliders() {
        let mut physics = PhysicsWorld::new(300.0, 0.015);
        physics.insert_fixed_cuboid(
            Vec2::new(16.0, 16.0),
            Vec2::splat(16.0),
            BodyTag::block(IVec2::ZERO),
            InteractionGroups::new(groups::BLOCK, Group::ALL),
        );
        let body = physics.insert_dynamic_body(Vec2::new(100.0, 0.0), 1.0);
        physics.attach_collider(
            body,
            ColliderBuilder::ball(5.0).build(),
            BodyTag::entity(BodyCategory::Mob, EntityId::new()),
        );
        assert_eq!(physics.collider_count(), 2);

        physics.remove_body(body);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(physics.collider_count(), 1);
    }
}
