use glam::IVec3;

/// What a benchmark scene exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Deaths around a single catalyst on a deep-dark floor, then live ticks.
    CatalystBurst { deaths: u32, experience: u32 },
    /// Several catalysts, each kept at the cursor cap by repeated deaths.
    SaturatedCapacity { catalysts: u32 },
    /// World-generation patches grown at spaced origins, one per tick.
    WorldGenPatch,
    /// Saving and restoring a full cursor list, once per tick.
    PersistRoundTrip,
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub name: &'static str,
    pub kind: SceneKind,
    pub seed: u64,
    /// Horizontal chunk radius of the generated floor.
    pub chunk_radius: i32,
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "catalyst-small",
            kind: SceneKind::CatalystBurst {
                deaths: 1,
                experience: 50,
            },
            seed: 1,
            chunk_radius: 2,
        },
        SceneConfig {
            name: "catalyst-burst",
            kind: SceneKind::CatalystBurst {
                deaths: 8,
                experience: 400,
            },
            seed: 2,
            chunk_radius: 3,
        },
        SceneConfig {
            name: "saturated",
            kind: SceneKind::SaturatedCapacity { catalysts: 9 },
            seed: 3,
            chunk_radius: 4,
        },
        SceneConfig {
            name: "worldgen-patch",
            kind: SceneKind::WorldGenPatch,
            seed: 4,
            chunk_radius: 4,
        },
        SceneConfig {
            name: "persist-roundtrip",
            kind: SceneKind::PersistRoundTrip,
            seed: 5,
            chunk_radius: 1,
        },
    ]
}

/// Catalyst positions for a scene: a square grid spaced 24 blocks apart,
/// set into the floor and centred on the origin.
pub fn catalyst_positions(count: u32) -> Vec<IVec3> {
    let side = (count as f64).sqrt().ceil() as i32;
    let offset = (side - 1) * 12;
    (0..count as i32)
        .map(|i| IVec3::new((i % side) * 24 - offset, -1, (i / side) * 24 - offset))
        .collect()
}
