//! Headless Columbus-View demo: drags the camera past the map edge,
//! releases it, and logs frames until the snap-back settles.
//!
//! Usage: `columbus-view [options.toml]`. Set `RUST_LOG=debug` to see the
//! controller's gesture lifecycle.

use std::path::Path;
use std::rc::Rc;

use columbus_view::camera::{Camera, ColumbusViewController, PerspectiveFrustum};
use columbus_view::geometry::{BodyGeometry, Ellipsoid};
use columbus_view::input::{InputEvent, InputSurface, MouseButton};
use columbus_view::options::Options;
use columbus_view::ColumbusError;
use glam::{DVec2, DVec3};
use web_time::{Duration, Instant};

const VIEWPORT: DVec2 = DVec2::new(1280.0, 720.0);
const FRAME: Duration = Duration::from_millis(16);
const DRAG_FRAMES: u32 = 60;
const MAX_FRAMES: u32 = 1000;

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded options from {path}");
                options
            }
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = run(&options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), ColumbusError> {
    let surface = InputSurface::new(VIEWPORT.x, VIEWPORT.y);
    let frustum = PerspectiveFrustum::from_options(&options.camera, VIEWPORT.x / VIEWPORT.y);

    // Start a little inside the eastern edge of the map
    let edge = Ellipsoid::WGS84.radii().x * std::f64::consts::PI;
    let camera = Camera::looking_down(DVec3::new(edge * 0.95, 0.0, 0.0), 2.0e6, frustum, VIEWPORT)
        .into_shared();

    let mut controller = ColumbusViewController::with_options(
        &surface,
        camera.clone(),
        None,
        &options.navigation,
        Rc::default(),
    )?;

    let mut now = Instant::now();
    let center = VIEWPORT * 0.5;
    surface.dispatch(InputEvent::CursorMoved { x: center.x, y: center.y });
    surface.dispatch(InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
    });

    for frame in 0..MAX_FRAMES {
        if frame < DRAG_FRAMES {
            let x = center.x - 40.0 * f64::from(frame + 1);
            surface.dispatch(InputEvent::CursorMoved { x, y: center.y });
        } else if frame == DRAG_FRAMES {
            surface.dispatch(InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            });
            log::info!("released drag");
        }

        let _alive = controller.update_at(now)?;
        let position = camera.borrow().position_wc();
        log::info!(
            "frame {frame:4}: x = {:.1} ({:+.4} of edge), state {:?}",
            position.x,
            position.x / edge - 1.0,
            controller.boundary_state()
        );

        if frame > DRAG_FRAMES && !controller.has_inertia() && !controller.correction_in_flight() {
            log::info!("settled after {frame} frames");
            break;
        }
        now += FRAME;
    }

    controller.destroy()
}
