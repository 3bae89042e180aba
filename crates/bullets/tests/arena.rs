//! Full pipeline against a real Rapier collision world.

use bullets::{
    BulletSettings, BulletSystem, PrefabRef, PrefabTemplate, ProjectileConfig, SceneGraph,
    VisualPool,
};
use engine_core::{ManualClock, Vec3};
use physics::{CollisionGroup, LayerMask, PhysicsWorld};

const TRACER: PrefabRef = PrefabRef(7);

fn arena() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    // Wall face at x = 19.5.
    world.add_static_cuboid(
        Vec3::new(20.0, 0.0, 0.0),
        0.0,
        Vec3::new(0.5, 50.0, 50.0),
        CollisionGroup::environment(),
    );
    // Player hull the player's own shots must pass through.
    world.add_static_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0, CollisionGroup::player());
    world.update_query_pipeline();
    world
}

fn bullets(grain_size: usize) -> BulletSystem<ManualClock, SceneGraph> {
    let mut scene = SceneGraph::new();
    scene.register_prefab(TRACER, PrefabTemplate::new("tracer", Vec3::ONE));
    let root = scene.root();
    let settings = BulletSettings {
        grain_size,
        initial_capacity: 16,
        removal_capacity: 4,
        visual_capacity: 4,
        ..Default::default()
    };
    let pool = VisualPool::new(scene, Some(root), settings.pool_stack_capacity);
    BulletSystem::new(ManualClock::new(), pool, settings)
}

fn shot(speed: f32, layer_mask: LayerMask) -> ProjectileConfig {
    ProjectileConfig {
        layer_mask,
        speed,
        radius: 0.1,
        time_to_live: 10.0,
    }
}

#[test]
fn wall_stops_shots_and_mask_ignores_own_hull() {
    let world = arena();
    let mut bullets = bullets(1);
    let own = LayerMask::from(CollisionGroup::Player);

    // Straight at the wall through the player's hull.
    bullets.spawn(Vec3::ZERO, Vec3::X, 0.0, shot(10.0, own), TRACER).unwrap();
    // Same line without the mask: stopped by the hull.
    bullets.spawn(Vec3::ZERO, Vec3::X, 0.0, shot(10.0, LayerMask::NONE), TRACER).unwrap();
    // Away from everything.
    bullets.spawn(Vec3::ZERO, -Vec3::X, 180.0, shot(10.0, own), TRACER).unwrap();

    let mut hits_per_tick = Vec::new();
    for _ in 0..3 {
        bullets.clock_mut().advance(0.5);
        let report = bullets.tick(&world).unwrap();
        assert_eq!(report.live, report.simulated - report.removed);
        hits_per_tick.push(report.hits);
    }

    // Tick 1 sweeps 0..5: the unmasked shot reaches the hull (face at 4.0).
    // Tick 2 sweeps 5..10, tick 3 sweeps 10..15: nothing yet.
    assert_eq!(hits_per_tick, vec![1, 0, 0]);
    assert_eq!(bullets.len(), 2);

    // Tick 4 sweeps 15..20 and meets the wall.
    bullets.clock_mut().advance(0.5);
    let report = bullets.tick(&world).unwrap();
    assert_eq!(report.hits, 1);
    assert_eq!(bullets.len(), 1);
    assert!(bullets.projectiles()[0].position.x < 0.0);
}

#[test]
fn large_volley_stays_dense_and_conserves_count() {
    let world = arena();
    let mut bullets = bullets(64);
    let n = 5_000;
    for i in 0..n {
        // Alternate toward and away from the wall, fanned out vertically.
        let direction = if i % 2 == 0 { Vec3::X } else { -Vec3::X };
        let origin = Vec3::new(8.0, (i / 2) as f32 * 0.01 - 12.5, 0.0);
        let config = ProjectileConfig {
            time_to_live: if i % 3 == 0 { 0.25 } else { 10.0 },
            ..shot(40.0, LayerMask::NONE)
        };
        bullets.spawn(origin, direction, 0.0, config, TRACER).unwrap();
    }

    let mut live = bullets.len();
    for _ in 0..4 {
        bullets.clock_mut().advance(0.25);
        let report = bullets.tick(&world).unwrap();
        assert_eq!(report.simulated, live);
        assert!(report.removed <= report.expired + report.hits);
        assert_eq!(report.live, live - report.removed);
        live = report.live;

        assert_eq!(bullets.projectiles().len(), bullets.configs().len());
        assert_eq!(bullets.projectiles().len(), bullets.pose_targets().len());
        assert_eq!(bullets.pool().loader().active_count(), bullets.len());
        for (projectile, handle) in bullets.projectiles().iter().zip(bullets.pose_targets()) {
            let pose = bullets.pool().loader().pose(*handle).unwrap();
            assert_eq!(pose.position, projectile.position);
        }
    }

    // Every shot heading for the wall is gone; survivors all fly away from it.
    assert!(bullets.projectiles().iter().all(|p| p.direction.x < 0.0));
    let stats = bullets.pool().stats();
    assert_eq!(stats.released, n - bullets.len());
}
