// src/main.rs

mod app;
mod demo_scene;
mod ui;

use anyhow::Context;
use clap::Parser;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};

use app::ShapeApp;
use golden_poly::config::ViewerConfig;
use golden_poly::logging::init_logging;

async fn run(config: ViewerConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = std::sync::Arc::new(
        WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
            .build(&event_loop)
            .context("creating window")?,
    );

    let mut app_state = ShapeApp::new(window.clone(), &config).await?;

    event_loop
        .run(move |event, target: &EventLoopWindowTarget<()>| {
            target.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => {
                    let response = app_state.handle_window_event(event, &window);
                    if response.repaint {
                        window.request_redraw();
                    }
                    if response.consumed {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested => {
                            app_state.shutdown();
                            target.exit();
                        }
                        WindowEvent::Resized(physical_size) => {
                            app_state.resize(*physical_size);
                            window.request_redraw();
                        }
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            app_state.set_scale_factor(*scale_factor);
                        }
                        WindowEvent::RedrawRequested => match app_state.render(&window) {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                app_state.resize(app_state.size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("wgpu out of memory, exiting");
                                app_state.shutdown();
                                target.exit();
                            }
                            Err(e) => log::warn!("surface error: {:?}", e),
                        },
                        _ => {}
                    }
                }
                Event::LoopExiting => app_state.shutdown(),
                _ => {}
            }
        })
        .context("running event loop")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::parse();
    init_logging(config.logging());
    run(config).await
}
