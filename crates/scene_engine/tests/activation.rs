//! End-to-end lifecycle tests: project activation, scene activation, frame
//! rendering, and transform visibility through the render pool

use scene_engine::foundation::math::Vec3;
use scene_engine::gui::{GuiAdaptor, GuiFrame};
use scene_engine::input::{ControlBinding, InputCode, InputSettings};
use scene_engine::prelude::*;
use scene_engine::render::{FramePacket, RenderError, RenderingSettings};
use scene_engine::scripting::{CustomComponent, ScriptEngine};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What one presented frame looked like to the backend
#[derive(Debug, Clone)]
struct FrameRecord {
    draw_count: usize,
    sprite_x: Vec<f32>,
}

#[derive(Default)]
struct Recording {
    frames: Vec<FrameRecord>,
    prepared_projects: Vec<String>,
    settings_applied: usize,
}

/// Backend that records what it is asked to draw
#[derive(Clone)]
struct RecordingBackend {
    recording: Arc<Mutex<Recording>>,
}

impl RecordingBackend {
    fn new() -> (Self, Arc<Mutex<Recording>>) {
        let recording = Arc::new(Mutex::new(Recording::default()));
        (
            Self {
                recording: Arc::clone(&recording),
            },
            recording,
        )
    }
}

impl RenderBackend for RecordingBackend {
    fn apply_settings(&mut self, _settings: &RenderingSettings) {
        self.recording.lock().unwrap().settings_applied += 1;
    }

    fn set_framebuffer_size(&mut self, _width: u32, _height: u32) {}

    fn prepare_project(&mut self, project_name: &str) {
        self.recording
            .lock()
            .unwrap()
            .prepared_projects
            .push(project_name.to_owned());
    }

    fn present(&mut self, frame: &FramePacket) -> Result<(), RenderError> {
        let sprite_x = frame
            .draws
            .iter()
            .filter(|d| d.kind == RenderKind::Sprite)
            .map(|d| d.model.m14)
            .collect();
        self.recording.lock().unwrap().frames.push(FrameRecord {
            draw_count: frame.draws.len(),
            sprite_x,
        });
        Ok(())
    }
}

fn demo_project() -> Project {
    use scene_engine::project::{ProjectInfo, ProjectSettings};
    let settings = ProjectSettings {
        rendering: RenderingSettings::default(),
        input: InputSettings {
            controls: vec![ControlBinding {
                name: "confirm".into(),
                codes: vec![InputCode::Enter],
            }],
        },
    };
    Project::new(
        ProjectInfo {
            name: "demo".into(),
            version: "0.1.0".into(),
            engine_version: "0.1".into(),
        },
        settings,
        HashMap::new(),
        "/tmp/demo",
    )
}

fn sprite_entity(name: &str, x: f32) -> Entity {
    let mut entity = Entity::new(name);
    entity.add_render_component(RenderComponent::sprite(format!("{name}.png")));
    entity.translate(Vec3::new(x, 0.0, 0.0));
    entity
}

#[test]
fn project_and_scene_activation_drive_the_backend() {
    let (backend, recording) = RecordingBackend::new();
    let mut window = HeadlessWindow::new(640, 480);
    window.queue_event(WindowEvent::Input {
        code: InputCode::Enter,
        pressed: true,
    });
    window.close_after(2);

    let mut controller = Controller::new(
        Box::new(window),
        Box::new(backend),
        Box::new(NullGuiAdaptor),
    );

    controller.set_active_project(demo_project());

    let mut scene = Scene::new("hub");
    scene.add_entity(sprite_entity("sign", 3.0));
    let mut hidden = sprite_entity("ghost", 9.0);
    hidden.set_enabled(false);
    scene.add_entity(hidden);

    let mut chunk = Chunk::new("north");
    chunk.add_entity(sprite_entity("tree", 5.0));
    scene.add_chunk(chunk);

    controller.add_scene(scene);
    controller.activate_scene("hub").unwrap();
    controller.start();

    let recording = recording.lock().unwrap();

    // project activation pushed the rendering settings to the backend
    assert!(recording.settings_applied >= 1);
    // scene activation created project-scoped resources
    assert_eq!(recording.prepared_projects, vec!["demo".to_string()]);

    // two frames were presented; each drew the gui sprite plus the two
    // enabled scene sprites, and never the disabled one
    assert_eq!(recording.frames.len(), 2);
    for frame in &recording.frames {
        assert_eq!(frame.draw_count, 3);
        assert!(frame.sprite_x.iter().any(|x| (x - 3.0).abs() < 1e-5));
        assert!(frame.sprite_x.iter().any(|x| (x - 5.0).abs() < 1e-5));
        assert!(!frame.sprite_x.iter().any(|x| (x - 9.0).abs() < 1e-5));
    }

    // the queued key press reached the named control
    assert!(controller.input().is_triggered("confirm"));
}

#[test]
fn transform_edits_are_visible_without_reregistration() {
    use scene_engine::render::{Camera, FrameContext, RenderingEngine};

    let (backend, recording) = RecordingBackend::new();
    let mut engine = RenderingEngine::new(Box::new(backend), 640, 480);

    let mut scene = Scene::new("lab");
    let entity = sprite_entity("probe", 1.0);
    let sprite_id = entity.render_component(RenderKind::Sprite).unwrap().id();
    let entity_id = scene.add_entity(entity);
    engine.pool_mut().add_sprite_renderer(entity_id, sprite_id);

    let mut camera = Camera::new();
    camera.update();

    let ctx = FrameContext {
        scenes: vec![&scene],
        overlays: vec![],
    };
    engine.render(&ctx, &camera).unwrap();

    // move the entity after registration; the pool holds a reference, not
    // a copy, so the next frame must see the new global transform
    scene
        .find_entity_mut(entity_id)
        .unwrap()
        .translate(Vec3::new(5.0, 0.0, 0.0));

    let ctx = FrameContext {
        scenes: vec![&scene],
        overlays: vec![],
    };
    engine.render(&ctx, &camera).unwrap();

    let recording = recording.lock().unwrap();
    assert_eq!(recording.frames.len(), 2);
    assert!((recording.frames[0].sprite_x[0] - 1.0).abs() < 1e-5);
    assert!((recording.frames[1].sprite_x[0] - 6.0).abs() < 1e-5);
}

#[derive(Default)]
struct TurretEngineState {
    live: Vec<u32>,
}

struct TurretEngine {
    state: Arc<Mutex<TurretEngineState>>,
}

impl ScriptEngine for TurretEngine {
    fn component_type_name(&self) -> &str {
        "turret"
    }

    fn add_component(&mut self, _entity: EntityId, component: &CustomComponent) {
        self.state.lock().unwrap().live.push(component.id().raw());
    }

    fn remove_component(&mut self, component: ComponentId) {
        self.state
            .lock()
            .unwrap()
            .live
            .retain(|&id| id != component.raw());
    }
}

#[test]
fn script_components_follow_the_activation_lifecycle() {
    let state = Arc::new(Mutex::new(TurretEngineState::default()));

    let mut controller = Controller::new(
        Box::new(HeadlessWindow::new(640, 480)),
        Box::<NullBackend>::default(),
        Box::new(NullGuiAdaptor),
    );
    controller.script_pool_mut().add_engine(Box::new(TurretEngine {
        state: Arc::clone(&state),
    }));

    let mut entity = Entity::new("tower");
    entity.add_custom_component(CustomComponent::new("north-gun", "turret"));
    let mut scene = Scene::new("fort");
    scene.add_entity(entity);
    controller.add_scene(scene);

    controller.activate_scene("fort").unwrap();
    assert_eq!(state.lock().unwrap().live.len(), 1);

    controller.deactivate_scene("fort").unwrap();
    assert!(state.lock().unwrap().live.is_empty());
}

/// GUI adaptor producing one fixed frame, to drive the texture upload path
struct OneShotGui {
    frame: Option<GuiFrame>,
}

impl GuiAdaptor for OneShotGui {
    fn update(&mut self) {}

    fn set_framebuffer_size(&mut self, _width: u32, _height: u32) {}

    fn take_frame(&mut self) -> Option<GuiFrame> {
        self.frame.take()
    }
}

#[test]
fn gui_frames_flow_into_the_gui_sprite() {
    let (backend, recording) = RecordingBackend::new();
    let mut window = HeadlessWindow::new(640, 480);
    window.close_after(1);

    let mut controller = Controller::new(
        Box::new(window),
        Box::new(backend),
        Box::new(OneShotGui {
            frame: Some(GuiFrame {
                data: vec![0u8; 4 * 4 * 4],
                width: 4,
                height: 4,
            }),
        }),
    );

    controller.start();

    // the gui sprite stayed registered through the remove/re-add cycle
    let recording = recording.lock().unwrap();
    assert_eq!(recording.frames.len(), 1);
    assert_eq!(recording.frames[0].draw_count, 1);
}
