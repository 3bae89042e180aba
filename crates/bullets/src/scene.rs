//! Headless scene holding projectile visuals as ECS entities.
//!
//! Implements both visual collaborators: [`ResourceLoader`] for the pool and
//! [`PoseSink`] for the pose-sync stage. Poses sit behind a per-entity mutex;
//! each sync task touches a single entity, so the locks never contend.

use engine_core::{Quat, Transform, TransformRaw, Vec3};
use hecs::{Entity, World};
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::visual::{LoadError, PoseSink, PrefabRef, ResourceLoader, VisualHandle};

/// What a prefab instantiates into.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabTemplate {
    pub name: String,
    pub scale: Vec3,
}

impl PrefabTemplate {
    pub fn new(name: impl Into<String>, scale: Vec3) -> Self {
        Self {
            name: name.into(),
            scale,
        }
    }
}

/// Prefab the visual was created from.
#[derive(Debug, Clone, Copy)]
pub struct Visual {
    pub prefab: PrefabRef,
}

/// Whether the visual is drawn.
#[derive(Debug, Clone, Copy)]
pub struct Active(pub bool);

#[derive(Debug, Clone, Copy)]
pub struct Parent(pub Entity);

/// Last pose written by the simulation.
#[derive(Debug)]
pub struct PoseCell(pub Mutex<Transform>);

pub struct SceneGraph {
    world: World,
    root: Entity,
    prefabs: HashMap<PrefabRef, PrefabTemplate>,
    loads: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut world = World::new();
        let root = world.spawn((PoseCell(Mutex::new(Transform::default())),));
        Self {
            world,
            root,
            prefabs: HashMap::new(),
            loads: 0,
        }
    }

    /// Entity new visuals are parented under.
    pub fn root(&self) -> Entity {
        self.root
    }

    pub fn register_prefab(&mut self, prefab: PrefabRef, template: PrefabTemplate) {
        log::debug!("Registered {prefab} as {:?}", template.name);
        self.prefabs.insert(prefab, template);
    }

    /// Number of successful template loads.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Visual entities ever created, active or pooled.
    pub fn visual_count(&self) -> usize {
        self.world.query::<&Visual>().iter().count()
    }

    pub fn active_count(&self) -> usize {
        self.world
            .query::<(&Visual, &Active)>()
            .iter()
            .filter(|(_, (_, active))| active.0)
            .count()
    }

    pub fn is_active(&self, handle: VisualHandle) -> bool {
        self.world
            .get::<&Active>(handle)
            .map(|active| active.0)
            .unwrap_or(false)
    }

    pub fn parent_of(&self, handle: VisualHandle) -> Option<Entity> {
        self.world.get::<&Parent>(handle).ok().map(|parent| parent.0)
    }

    pub fn pose(&self, handle: VisualHandle) -> Option<Transform> {
        self.world
            .get::<&PoseCell>(handle)
            .ok()
            .map(|cell| {
                let pose = *cell.0.lock();
                pose
            })
    }

    /// Model matrices of every active visual, ready for instanced drawing.
    pub fn instance_data(&self) -> Vec<TransformRaw> {
        self.world
            .query::<(&Active, &PoseCell)>()
            .iter()
            .filter(|(_, (active, _))| active.0)
            .map(|(_, (_, cell))| {
                let pose = *cell.0.lock();
                TransformRaw::from(pose)
            })
            .collect()
    }

    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instance_data()).to_vec()
    }
}

impl ResourceLoader for SceneGraph {
    type Template = (PrefabRef, PrefabTemplate);

    fn load(&mut self, prefab: PrefabRef) -> Result<Self::Template, LoadError> {
        let template = self
            .prefabs
            .get(&prefab)
            .cloned()
            .ok_or(LoadError::UnknownPrefab(prefab))?;
        self.loads += 1;
        Ok((prefab, template))
    }

    fn instantiate(&mut self, template: &Self::Template, parent: Option<VisualHandle>) -> VisualHandle {
        let (prefab, template) = template;
        let pose = Transform::default().with_scale(template.scale);
        let handle = self.world.spawn((
            Visual { prefab: *prefab },
            Active(true),
            PoseCell(Mutex::new(pose)),
        ));
        if let Some(parent) = parent {
            // The handle was spawned just above, so it exists.
            let _ = self.world.insert_one(handle, Parent(parent));
        }
        handle
    }

    fn set_active(&mut self, handle: VisualHandle, active: bool) {
        if let Ok(mut flag) = self.world.get::<&mut Active>(handle) {
            flag.0 = active;
        }
    }
}

impl PoseSink for SceneGraph {
    fn set_pose(&self, handle: VisualHandle, position: Vec3, rotation: Quat) {
        if let Ok(cell) = self.world.get::<&PoseCell>(handle) {
            let mut pose = cell.0.lock();
            pose.position = position;
            pose.rotation = rotation;
        }
    }
}
