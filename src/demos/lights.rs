//! Primitives under every light kind.
//!
//! A sphere, a cube and a torus spin slowly above a plane. The directional light
//! casts their shadows onto the plane. Ambient intensity and the rect-area and
//! spot light positions can be tweaked with the keyboard through a [`DebugPanel`].

use std::f32::consts::PI;

use cgmath::Point3;
use winit::event::WindowEvent;

use crate::{
    clock::FrameTime,
    context::{Context, GPUResource, InitContext},
    data_structures::{
        color::Color,
        geometry,
        instance::Instance,
        light::{AmbientLight, DirectionalLight, HemisphereLight, LightRig, PointLight, RectAreaLight, SpotLight},
        material::{StandardMaterial, StandardParams},
        mesh::Mesh,
        scene::{LineNode, MeshNode, NodeId, Scene},
    },
    debug::{DebugPanel, NumberBinding},
    flow::{self, FlowConstructor, GraphicsFlow, Out},
    render::Render,
};

const EYE: Point3<f32> = Point3::new(1.0, 1.0, 2.0);
pub const ROUGHNESS: f32 = 0.4;

pub fn light_rig() -> LightRig {
    let mut directional = DirectionalLight::new(Color::from_hex(0xffffcc), 0.3);
    directional.cast_shadow = true;

    let mut point = PointLight::new(Color::from_hex(0xff9000), 1.5);
    point.distance = 3.0;

    let mut rect_area = RectAreaLight::new(Color::WHITE, 2.0, 1.0, 1.0);
    rect_area.position = Point3::new(-1.5, 0.0, 1.5);
    rect_area.look_at(Point3::new(0.0, 0.0, 0.0));

    LightRig {
        ambient: Some(AmbientLight {
            color: Color::WHITE,
            intensity: 1.0,
        }),
        directional: Some(directional),
        hemisphere: Some(HemisphereLight {
            sky_color: Color::from_hex(0x0000ff),
            ground_color: Color::from_hex(0xff0000),
            intensity: 0.9,
        }),
        point: Some(point),
        rect_area: Some(rect_area),
        spot: Some(SpotLight::new(Color::WHITE, 1.5, 3.0, PI * 0.25, 0.25, 0.0)),
    }
}

pub fn debug_panel() -> DebugPanel<LightRig> {
    DebugPanel::new("Lights")
        .folder(
            "AmbientLight",
            vec![
                NumberBinding::new(
                    "intensity",
                    "intensity",
                    |rig: &LightRig| rig.ambient.map_or(0.0, |a| a.intensity),
                    |rig: &mut LightRig, v| {
                        if let Some(a) = rig.ambient.as_mut() {
                            a.intensity = v;
                        }
                    },
                )
                .min(0.0)
                .max(3.0)
                .step(0.01),
            ],
        )
        .folder(
            "RectAreaLight",
            vec![
                NumberBinding::new(
                    "x",
                    "position.x",
                    |rig: &LightRig| rig.rect_area.map_or(0.0, |r| r.position.x),
                    |rig: &mut LightRig, v| {
                        if let Some(r) = rig.rect_area.as_mut() {
                            r.position.x = v;
                        }
                    },
                )
                .step(0.02),
                NumberBinding::new(
                    "y",
                    "position.y",
                    |rig: &LightRig| rig.rect_area.map_or(0.0, |r| r.position.y),
                    |rig: &mut LightRig, v| {
                        if let Some(r) = rig.rect_area.as_mut() {
                            r.position.y = v;
                        }
                    },
                )
                .step(0.02),
                NumberBinding::new(
                    "z",
                    "position.z",
                    |rig: &LightRig| rig.rect_area.map_or(0.0, |r| r.position.z),
                    |rig: &mut LightRig, v| {
                        if let Some(r) = rig.rect_area.as_mut() {
                            r.position.z = v;
                        }
                    },
                )
                .step(0.02),
            ],
        )
        .folder(
            "SpotLight",
            vec![
                NumberBinding::new(
                    "x",
                    "position.x",
                    |rig: &LightRig| rig.spot.map_or(0.0, |s| s.position.x),
                    |rig: &mut LightRig, v| {
                        if let Some(s) = rig.spot.as_mut() {
                            s.position.x = v;
                        }
                    },
                )
                .step(0.02),
                NumberBinding::new(
                    "y",
                    "position.y",
                    |rig: &LightRig| rig.spot.map_or(0.0, |s| s.position.y),
                    |rig: &mut LightRig, v| {
                        if let Some(s) = rig.spot.as_mut() {
                            s.position.y = v;
                        }
                    },
                )
                .step(0.02),
                NumberBinding::new(
                    "z",
                    "position.z",
                    |rig: &LightRig| rig.spot.map_or(0.0, |s| s.position.z),
                    |rig: &mut LightRig, v| {
                        if let Some(s) = rig.spot.as_mut() {
                            s.position.z = v;
                        }
                    },
                )
                .step(0.02),
            ],
        )
}

pub struct LightsFlow {
    scene: Scene,
    panel: DebugPanel<LightRig>,
    /// Sphere, cube and torus. The plane stays put.
    spinning: [NodeId; 3],
}

impl LightsFlow {
    pub fn new(init: InitContext) -> Self {
        let device = &init.device;
        let mut scene = Scene::new();
        let material = scene.add_material(StandardMaterial::new(
            device,
            &init.layouts.standard,
            "standard",
            StandardParams::default().with_roughness(ROUGHNESS),
        ));

        let sphere = Mesh::new(device, "sphere", &geometry::sphere(0.5, 32, 32));
        let cube = Mesh::new(device, "cube", &geometry::cuboid(0.75, 0.75, 0.75));
        let torus = Mesh::new(device, "torus", &geometry::torus(0.3, 0.2, 32, 64));
        let plane = Mesh::new(device, "plane", &geometry::plane(5.0, 5.0));

        let sphere = scene.add(
            MeshNode::new(device, sphere, material, vec![Instance::new().with_position(-1.5, 0.0, 0.0)])
                .with_cast_shadow(true),
        );
        let cube = scene.add(MeshNode::new(device, cube, material, vec![Instance::new()]).with_cast_shadow(true));
        let torus = scene.add(
            MeshNode::new(device, torus, material, vec![Instance::new().with_position(1.5, 0.0, 0.0)])
                .with_cast_shadow(true),
        );
        let mut floor = Instance::new().with_position(0.0, -0.65, 0.0).with_rotation_x(-0.5 * PI);
        floor.receive_shadow = true;
        scene.add(MeshNode::new(device, plane, material, vec![floor]));

        scene.add_lines(LineNode::axes(device, 1.0));
        scene.lights = light_rig();

        Self {
            scene,
            panel: debug_panel(),
            spinning: [sphere, cube, torus],
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl GraphicsFlow<(), ()> for LightsFlow {
    fn on_init(&mut self, ctx: &mut Context, _state: &mut ()) -> Out<()> {
        super::orbit_camera(ctx, EYE);
        ctx.shadows = true;
        log::info!("\n{}", self.panel.describe(&self.scene.lights));
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, _state: &mut (), time: FrameTime) -> Out<()> {
        let t = time.elapsed_secs();
        for id in self.spinning {
            if let Some(node) = self.scene.node_mut(id) {
                node.instances_mut().iter_mut().for_each(|instance| instance.spin(t));
            }
        }
        self.scene.write_to_buffer(&ctx.queue);
        Out::Empty
    }

    fn on_window_events(&mut self, _ctx: &Context, _state: &mut (), event: &WindowEvent) -> Out<()> {
        self.panel.handle_window_events(event, &mut self.scene.lights);
        Out::Empty
    }

    fn light_rig(&self) -> Option<&LightRig> {
        Some(&self.scene.lights)
    }

    fn on_render(&self) -> Render<'_> {
        self.scene.get_render()
    }
}

pub fn constructor() -> FlowConstructor<(), ()> {
    Box::new(|init| Box::pin(async move { Box::new(LightsFlow::new(init)) as Box<dyn GraphicsFlow<(), ()>> }))
}

pub fn run() -> anyhow::Result<()> {
    flow::run("lights", vec![constructor()])
}
