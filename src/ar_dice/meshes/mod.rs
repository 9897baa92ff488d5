pub mod face_labels;
pub mod poker_die;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ar_dice::types::{DiceStyle, PokerFace, DICE_STYLE_COUNT};

pub use face_labels::{create_label_mesh, label_rotation, label_transform};
pub use poker_die::{create_poker_die, face_up, pick_radius, POKER_FACES};

/// Render and collision data for one die style
#[derive(Clone)]
pub struct DieVariant {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub collider: Collider,
    pub label_material: Handle<StandardMaterial>,
    pub size: f32,
}

/// Shared rank mesh for one face, sized for a unit die
#[derive(Clone)]
pub struct FaceLabelMesh {
    pub normal: Vec3,
    pub face: PokerFace,
    pub mesh: Handle<Mesh>,
}

/// Prototypes for every die style, built once at startup
#[derive(Resource, Clone)]
pub struct DiceAssets {
    variants: Vec<DieVariant>,
    face_labels: Vec<FaceLabelMesh>,
}

impl DiceAssets {
    pub fn build(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let variants = (0..DICE_STYLE_COUNT)
            .map(DiceStyle::new)
            .map(|style| {
                let (mesh, collider) = create_poker_die(style.size());
                let material = materials.add(StandardMaterial {
                    base_color: style.color(),
                    alpha_mode: if style.is_translucent() {
                        AlphaMode::Blend
                    } else {
                        AlphaMode::Opaque
                    },
                    reflectance: 0.6,
                    perceptual_roughness: 0.25,
                    ..default()
                });
                let label_material = materials.add(StandardMaterial {
                    base_color: style.label_color(),
                    unlit: true,
                    ..default()
                });
                DieVariant {
                    mesh: meshes.add(mesh),
                    material,
                    collider,
                    label_material,
                    size: style.size(),
                }
            })
            .collect();

        let face_labels = POKER_FACES
            .iter()
            .map(|(normal, face)| FaceLabelMesh {
                normal: *normal,
                face: *face,
                mesh: meshes.add(create_label_mesh(*face)),
            })
            .collect();

        Self {
            variants,
            face_labels,
        }
    }

    pub fn face_labels(&self) -> &[FaceLabelMesh] {
        &self.face_labels
    }

    pub fn variant(&self, style: DiceStyle) -> Option<&DieVariant> {
        self.variants.get(style.index())
    }
}

/// Shared materials for plane proxies and the reticle
#[derive(Resource, Clone)]
pub struct SurfaceAssets {
    pub plane_material: Handle<StandardMaterial>,
}

impl SurfaceAssets {
    pub fn build(materials: &mut Assets<StandardMaterial>) -> Self {
        let plane_material = materials.add(StandardMaterial {
            base_color: Color::srgba(0.2, 0.55, 0.3, 0.45), // Felt green, see-through
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 0.9,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        Self { plane_material }
    }
}

/// Flat ring marking where a throw would land
pub fn create_reticle_mesh() -> Mesh {
    Mesh::from(Torus::new(0.035, 0.04))
}
