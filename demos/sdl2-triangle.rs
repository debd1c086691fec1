//! The animated one-triangle scene: a colored triangle whose vertices slide
//! along sine/cosine of a running angle, plus an optional texture drawn in
//! the corner (pass a relative image path as the first argument).

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use glint::{
    cgmath::Vector2,
    gl_utils,
    Color,
    FramePacer,
    Renderer,
    ResourceBundle,
    Texture2D,
    Vertex,
};

fn run(sdl_context: &sdl2::Sdl, window: &sdl2::video::Window) {
    let mut event_pump = sdl_context.event_pump().unwrap();

    let mut renderer = Renderer::new(window.drawable_size()).expect("error when creating renderer");

    let texture: Option<Texture2D> = std::env::args().nth(1).map(|path| {
        let bundle = ResourceBundle::new(".");
        bundle.load_texture(&path).expect("could not load the texture resource")
    });

    let mut pacer = FramePacer::new(60);
    let mut theta: f64 = 0.0;

    log::info!("Running main loop...");
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit {..} | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => {
                    break 'running
                },
                Event::Window { win_event: WindowEvent::SizeChanged(w, h), ..} => {
                    debug_assert!(w >= 0);
                    debug_assert!(h >= 0);
                    renderer.set_viewport(w as u32, h as u32);
                },
                _ => {}
            }
        }

        let (width, height) = renderer.viewport();
        theta += 0.01;
        let (s, c) = (theta.sin(), theta.cos());
        let sx = ((1.0 + s) * f64::from(width) / 2.0) as f32;
        let sy = ((1.0 + s) * f64::from(height) / 2.0) as f32;
        let cx = ((1.0 + c) * f64::from(width) / 2.0) as f32;
        let cy = ((1.0 + c) * f64::from(height) / 2.0) as f32;

        renderer.clear(Some(Color::from_rgb(32u8, 32, 32)));
        renderer.draw_triangle(&[
            Vertex::colored(Vector2::new(cx, cy), Color::from_rgb(1.0f32, 0.0, 0.0)),
            Vertex::colored(Vector2::new(0.0, cy), Color::from_rgb(0.0f32, 1.0, 0.0)),
            Vertex::colored(Vector2::new(sx, sy), Color::from_rgb(0.0f32, 0.0, 1.0)),
        ]);
        if let Some(texture) = &texture {
            renderer.draw_texture(texture, Vector2::new(16.0, 16.0), 1.0);
        }
        gl_utils::check_gl_errors("clear, draw_triangle, draw_texture")
            .expect("GL errors pending after frame");

        window.gl_swap_window();
        let skipped = pacer.wait();
        if skipped > 0 {
            log::warn!("render loop fell behind, skipped {} frame(s)", skipped);
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting program");
    let sdl_context = sdl2::init().unwrap();
    let video_subsystem = sdl_context.video().unwrap();

    let gl_attr = video_subsystem.gl_attr();
    gl_attr.set_context_profile(::sdl2::video::GLProfile::Core);
    gl_attr.set_context_version(3, 3);

    let window = video_subsystem.window("One Triangle", 1280, 720)
        .resizable()
        .opengl()
        .build()
        .unwrap();

    let _ctx = window.gl_create_context().unwrap();
    gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

    // Yes, we're still using the Core profile
    debug_assert_eq!(gl_attr.context_profile(), sdl2::video::GLProfile::Core);
    // ... and we're still using OpenGL 3.3
    debug_assert_eq!(gl_attr.context_version(), (3, 3));

    if let Some(e) = gl_utils::gl_get_error() {
        panic!("opengl fatal error {:x} while initializing", e);
    }

    // pacing is handled by the FramePacer, not by the driver's vsync
    video_subsystem.gl_set_swap_interval(sdl2::video::SwapInterval::Immediate).expect("failed to disable vsync");

    log::info!(
        "OpenGL Vendor: {}",
        gl_utils::gl_get_string(gl::VENDOR).to_string_lossy(),
    );
    log::info!(
        "OpenGL Renderer: {}",
        gl_utils::gl_get_string(gl::RENDERER).to_string_lossy(),
    );
    log::info!(
        "OpenGL Version: {}, GLSL Version: {}",
        gl_utils::gl_get_string(gl::VERSION).to_string_lossy(),
        gl_utils::gl_get_string(gl::SHADING_LANGUAGE_VERSION).to_string_lossy(),
    );
    log::info!("OpenGL MAX_TEXTURE_SIZE: {}", gl_utils::gl_get_int(gl::MAX_TEXTURE_SIZE));

    log::info!("Initialized OpenGL, running...");
    run(&sdl_context, &window);
}
