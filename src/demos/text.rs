//! Matcap text and donuts.
//!
//! The donuts exist from the first frame. The font and the matcap image load in
//! the background and arrive as independent [`TextEvent`]s: the text mesh is added
//! when the font is ready and the matcap swaps in when the image is decoded.

use cgmath::Point3;

use crate::{
    clock::FrameTime,
    context::{Context, GPUResource, InitContext},
    data_structures::{
        geometry,
        instance::{Instance, scatter},
        material::{MatcapMaterial, Material, MaterialId},
        mesh::Mesh,
        scene::{MeshNode, Scene},
        text::{TextOptions, Typeface, extrude_text},
        texture::Texture,
    },
    flow::{self, FlowConstructor, GraphicsFlow, Out},
    render::Render,
    resources,
};

pub const TEXT: &str = "안녕하세요.";
pub const FONT: &str = "pretendard_regular.json";
pub const MATCAP: &str = "matcap.png";

pub const DONUT_COUNT: usize = 1000;
/// Edge of the cube the donuts are scattered in.
pub const DONUT_EXTENT: f32 = 10.0;

const EYE: Point3<f32> = Point3::new(0.0, 0.0, 3.0);

/// Results of the background loads.
pub enum TextEvent {
    FontLoaded(anyhow::Result<Typeface>),
    MatcapLoaded(anyhow::Result<image::DynamicImage>),
}

pub struct TextFlow {
    init: InitContext,
    scene: Scene,
    material: MaterialId,
}

impl TextFlow {
    pub fn new(init: InitContext) -> Self {
        let mut scene = Scene::new();
        // Without an image the matcap shades everything in the base colour
        let placeholder = Texture::solid(&init.device, &init.queue, [255, 255, 255, 255], "placeholder matcap");
        let material = scene.add_material(MatcapMaterial::new(
            &init.device,
            &init.layouts.matcap,
            "matcap",
            placeholder,
        ));

        let donut = Mesh::new(&init.device, "donut", &geometry::torus(0.2, 0.2, 20, 45));
        let donuts = scatter(&mut rand::rng(), DONUT_COUNT, DONUT_EXTENT);
        scene.add(MeshNode::new(&init.device, donut, material, donuts));

        Self { init, scene, material }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn add_text(&mut self, face: &Typeface) -> anyhow::Result<()> {
        let mut geometry = extrude_text(face, TEXT, TextOptions::new(0.2, 0.1))?;
        geometry.center();
        log::info!("Text mesh ready ({} triangles)", geometry.triangle_count());
        let mesh = Mesh::new(&self.init.device, "text", &geometry);
        self.scene
            .add(MeshNode::new(&self.init.device, mesh, self.material, vec![Instance::new()]));
        Ok(())
    }

    fn set_matcap(&mut self, image: &image::DynamicImage) {
        let texture = Texture::from_image(&self.init.device, &self.init.queue, image, Some(MATCAP));
        if let Some(Material::Matcap(material)) = self.scene.material_mut(self.material) {
            material.set_matcap(&self.init.device, &self.init.layouts.matcap, texture);
        }
    }
}

impl GraphicsFlow<(), TextEvent> for TextFlow {
    fn on_init(&mut self, ctx: &mut Context, _state: &mut ()) -> Out<TextEvent> {
        super::orbit_camera(ctx, EYE);
        let font: Box<dyn Future<Output = TextEvent>> =
            Box::new(async { TextEvent::FontLoaded(resources::load_typeface(FONT).await) });
        let matcap: Box<dyn Future<Output = TextEvent>> =
            Box::new(async { TextEvent::MatcapLoaded(resources::load_image(MATCAP).await) });
        Out::FutEvent(vec![font, matcap])
    }

    fn on_update(&mut self, ctx: &Context, _state: &mut (), _time: FrameTime) -> Out<TextEvent> {
        self.scene.write_to_buffer(&ctx.queue);
        Out::Empty
    }

    fn on_custom_events(&mut self, _ctx: &Context, _state: &mut (), event: TextEvent) -> Option<TextEvent> {
        match event {
            TextEvent::FontLoaded(Ok(face)) => {
                if let Err(e) = self.add_text(&face) {
                    log::error!("Cannot build the text mesh: {:#}", e);
                }
            }
            TextEvent::FontLoaded(Err(e)) => log::error!("Cannot load {}: {:#}", FONT, e),
            TextEvent::MatcapLoaded(Ok(image)) => self.set_matcap(&image),
            TextEvent::MatcapLoaded(Err(e)) => log::error!("Cannot load {}: {:#}", MATCAP, e),
        }
        None
    }

    fn on_render(&self) -> Render<'_> {
        self.scene.get_render()
    }
}

pub fn constructor() -> FlowConstructor<(), TextEvent> {
    Box::new(|init| {
        Box::pin(async move { Box::new(TextFlow::new(init)) as Box<dyn GraphicsFlow<(), TextEvent>> })
    })
}

pub fn run() -> anyhow::Result<()> {
    flow::run("text", vec![constructor()])
}
