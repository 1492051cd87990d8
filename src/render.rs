//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn with a [`Render`] tree. Each frame the
//! engine flattens all trees into [`Batches`], one list per pipeline, so that every
//! pipeline is bound once per pass no matter how many flows or nodes use it.

use crate::data_structures::{material::Material, mesh::Mesh};

/// An instanced mesh: the mesh, its material and the buffer of per-instance data.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub material: &'a Material,
    pub amount: usize,
    pub casts_shadow: bool,
}

/// A non-indexed list of coloured line segments.
pub struct Lines<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub amount: u32,
}

/// Specifies how a flow's objects should be rendered.
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders one instanced mesh with its material's pipeline
/// - `Lines(Lines)` renders helper lines
/// - `Composed(Vec<Render>)` recursively renders a composition
pub enum Render<'a> {
    None,
    Default(Instanced<'a>),
    Lines(Lines<'a>),
    Composed(Vec<Render<'a>>),
}

/// Renderables sorted by the pipeline that draws them.
#[derive(Default)]
pub struct Batches<'a> {
    pub matcap: Vec<Instanced<'a>>,
    pub standard: Vec<Instanced<'a>>,
    pub lines: Vec<Lines<'a>>,
}

impl<'a> Batches<'a> {
    /// Everything that is rendered into the shadow map.
    pub fn shadow_casters(&self) -> impl Iterator<Item = &Instanced<'a>> {
        self.matcap
            .iter()
            .chain(self.standard.iter())
            .filter(|instanced| instanced.casts_shadow)
    }

    fn push(&mut self, instanced: Instanced<'a>) {
        if instanced.amount == 0 || instanced.mesh.num_elements == 0 {
            log::warn!("{} has no instances or no triangles and is skipped", instanced.mesh.name);
            return;
        }
        match instanced.material {
            Material::Matcap(_) => self.matcap.push(instanced),
            Material::Standard(_) => self.standard.push(instanced),
        }
    }
}

impl<'a> Render<'a> {
    pub fn partition(self, batches: &mut Batches<'a>) {
        match self {
            Render::Default(instanced) => batches.push(instanced),
            Render::Lines(lines) => batches.lines.push(lines),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.partition(batches)),
            Render::None => (),
        }
    }
}
