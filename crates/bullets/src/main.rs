//! Bullet Storm - headless stress run of the projectile pipeline.
//!
//! Two turrets in a walled arena spray projectiles every frame; the run logs
//! what each tick did and how well the visual pool recycled.

use std::time::Duration;

use anyhow::Result;
use bullets::{
    BulletSettings, BulletSystem, PrefabRef, PrefabTemplate, ProjectileConfig, SceneGraph,
    TickReport, VisualPool,
};
use engine_core::{Quat, Time, Transform, Vec3};
use physics::{CollisionGroup, LayerMask, PhysicsWorld};
use rand::Rng;

const FRAMES: u64 = 300;
const FRAME_TIME: Duration = Duration::from_millis(16);
const TRACER: PrefabRef = PrefabRef(0);
const SLUG: PrefabRef = PrefabRef(1);

/// A fixed emitter firing bursts of projectiles in a random arc.
struct Turret {
    position: Vec3,
    burst: u32,
    spread_degrees: f32,
    prefab: PrefabRef,
    config: ProjectileConfig,
}

impl Turret {
    fn fire(
        &self,
        bullets: &mut BulletSystem<Time, SceneGraph>,
        rng: &mut impl Rng,
    ) -> Result<()> {
        for _ in 0..self.burst {
            let yaw = rng.gen_range(-180.0..180.0);
            let pitch = rng.gen_range(-self.spread_degrees..self.spread_degrees).to_radians();
            let direction = Transform::yaw_degrees(yaw) * Quat::from_rotation_x(pitch) * -Vec3::Z;
            bullets.spawn(self.position, direction, yaw, self.config, self.prefab)?;
        }
        Ok(())
    }
}

/// Ground plane, a ring of walls, and a few enemy hulls to shoot at.
fn build_arena() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.add_ground_plane();

    let segments = 24;
    let radius = 40.0;
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let center = Vec3::new(angle.cos() * radius, 4.0, angle.sin() * radius);
        world.add_static_cuboid(
            center,
            -angle,
            Vec3::new(0.5, 4.0, 5.5),
            CollisionGroup::environment(),
        );
    }

    for i in 0..6 {
        let angle = i as f32 / 6.0 * std::f32::consts::TAU;
        let center = Vec3::new(angle.cos() * 15.0, 1.5, angle.sin() * 15.0);
        world.add_static_sphere(center, 1.5, CollisionGroup::enemy());
    }

    world.update_query_pipeline();
    log::info!("Arena built with {} colliders", world.collider_count());
    world
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Bullet Storm ({FRAMES} frames)");

    let settings = BulletSettings::load("bullets.ron");
    let arena = build_arena();

    let mut scene = SceneGraph::new();
    scene.register_prefab(TRACER, PrefabTemplate::new("tracer", Vec3::new(0.05, 0.05, 0.6)));
    scene.register_prefab(SLUG, PrefabTemplate::new("slug", Vec3::splat(0.2)));
    let root = scene.root();
    let pool = VisualPool::new(scene, Some(root), settings.pool_stack_capacity);
    let mut bullets = BulletSystem::new(Time::new(), pool, settings);

    let player_mask = LayerMask::from(CollisionGroup::Player) | CollisionGroup::PlayerProjectile;
    let turrets = [
        Turret {
            position: Vec3::new(0.0, 1.0, 0.0),
            burst: 48,
            spread_degrees: 4.0,
            prefab: TRACER,
            config: ProjectileConfig {
                layer_mask: player_mask,
                speed: 60.0,
                radius: 0.05,
                time_to_live: 1.5,
            },
        },
        Turret {
            position: Vec3::new(5.0, 2.0, 5.0),
            burst: 8,
            spread_degrees: 10.0,
            prefab: SLUG,
            config: ProjectileConfig {
                layer_mask: LayerMask::from(CollisionGroup::Enemy),
                speed: 20.0,
                radius: 0.2,
                time_to_live: 4.0,
            },
        },
    ];

    let mut rng = rand::thread_rng();
    let mut totals = TickReport::default();
    let mut peak_live = 0;

    for frame in 1..=FRAMES {
        bullets.clock_mut().update();
        for turret in &turrets {
            turret.fire(&mut bullets, &mut rng)?;
        }

        let report = bullets.tick(&arena)?;
        totals.simulated += report.simulated;
        totals.expired += report.expired;
        totals.casts += report.casts;
        totals.hits += report.hits;
        totals.removed += report.removed;
        peak_live = peak_live.max(report.live);

        if frame % 60 == 0 {
            log::info!(
                "frame {frame}: {} live, {} hits, {} expired, {:.0} fps",
                report.live,
                report.hits,
                report.expired,
                bullets.clock().fps()
            );
        }

        std::thread::sleep(FRAME_TIME);
    }

    let stats = bullets.pool().stats();
    let upload = bullets.pool().loader().instance_bytes();
    log::info!(
        "Done: {} casts, {} hits, {} expired, {} removed, peak {} live",
        totals.casts,
        totals.hits,
        totals.expired,
        totals.removed,
        peak_live
    );
    log::info!(
        "Visual pool: {} instantiated, {} reused, {} released; {} bytes of instance data",
        stats.instantiated,
        stats.reused,
        stats.released,
        upload.len()
    );

    bullets.clear();
    Ok(())
}
