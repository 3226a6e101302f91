//! Editor application
//!
//! Creates the window, wires the controller, optionally loads the project
//! given as the first argument, and runs the frame loop until the window
//! closes.

use scene_engine::prelude::*;
use scene_engine::window::GlfwWindowManager;
use std::path::Path;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting scene editor");

    let window: Box<dyn WindowManager> = match GlfwWindowManager::new("Scene Editor", 1280, 720) {
        Ok(window) => Box::new(window),
        Err(e) => {
            log::warn!("window creation failed ({e}); falling back to headless mode");
            let mut headless = HeadlessWindow::new(1280, 720);
            // a headless editor has nothing to wait for
            headless.close_after(1);
            Box::new(headless)
        }
    };

    let mut controller = Controller::new(
        window,
        Box::<NullBackend>::default(),
        Box::new(NullGuiAdaptor),
    );

    if let Some(project_path) = std::env::args().nth(1) {
        load_project_into(&mut controller, Path::new(&project_path));
    }

    controller.start();
    log::info!("Editor exited");
}

/// Load a project and all its declared scenes, then activate the first
/// declared scene
fn load_project_into(controller: &mut Controller, path: &Path) {
    let loader = FileProjectLoader::new();
    let project = match loader.load_project(path) {
        Ok(project) => project,
        Err(e) => {
            log::error!("failed to load project at {}: {e}", path.display());
            return;
        }
    };

    let mut scenes = Vec::new();
    let mut names: Vec<&String> = project.scene_declarations().keys().collect();
    names.sort();
    for name in names {
        match loader.load_scene(&project, name) {
            Ok(scene) => scenes.push(scene),
            Err(e) => log::error!("failed to load scene '{name}': {e}"),
        }
    }

    let first_scene = scenes.first().map(|s| s.name().to_owned());
    controller.set_active_project(project);
    for scene in scenes {
        controller.add_scene(scene);
    }
    if let Some(name) = first_scene {
        if let Err(e) = controller.activate_scene(&name) {
            log::error!("failed to activate scene '{name}': {e}");
        }
    }
}
