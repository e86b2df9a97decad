//! Tether - desktop shell entry point
//!
//! Hosts the remote web application in native windows. The event loop owns
//! the [`Shell`] (window policy) and the [`Desktop`] (native windows); webview
//! callbacks reach both only as [`UserEvent`]s sent through the loop proxy.

mod bridge;
mod clipboard;
mod desktop;
mod menu;
mod platform;
mod session;

use anyhow::Context;
use bridge::IpcMessage;
use desktop::Desktop;
use muda::{Menu, MenuEvent, MenuId};
use platform::get_platform_manager;
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tether_core::types::{NavigationRequest, WindowId};
use tether_core::ShellConfig;
use tether_shell::{InputDisposition, Shell};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Events raised by webview and menu callbacks for the event loop
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// A window's content finished loading the given URL
    PageLoaded(WindowId, String),
    /// Content asked for a new window; the default popup was already denied
    NewWindowRequested(NavigationRequest),
    /// Message from a window's page bridge
    Ipc(WindowId, IpcMessage),
    /// A native menu item was picked
    Menu(MenuId),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging with log compatibility
    tracing_log::LogTracer::init().context("Failed to set log tracer")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Tether...");

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

    let menu_proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        let _ = menu_proxy.send_event(UserEvent::Menu(event.id));
    }));

    let platform = get_platform_manager();
    info!("Platform: {}", platform.platform_name());

    // Lives for the whole run: the loop below never returns
    let app_menu = Menu::new();
    if platform.capabilities().native_menu_required_for_clipboard {
        if let Err(e) = platform.initialize_app_menu(&app_menu) {
            error!("Failed to initialize app menu: {}", e);
        }
    }

    let mut shell = Shell::new(ShellConfig::default());
    let mut desktop = Desktop::new(event_loop.create_proxy(), platform);

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                shell.on_app_ready(&mut desktop.host(target));
            }
            #[cfg(target_os = "macos")]
            Event::Reopen { .. } => {
                shell.on_activated(&mut desktop.host(target));
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                window_id,
                ..
            } => {
                if let Some(id) = desktop.managed_id(window_id) {
                    shell.on_window_closed(&mut desktop.host(target), id);
                }
            }
            Event::UserEvent(user_event) => match user_event {
                UserEvent::PageLoaded(id, url) => {
                    desktop.record_load(id, &url);
                    shell.on_content_ready(&mut desktop.host(target), id);
                }
                UserEvent::NewWindowRequested(request) => {
                    shell.on_new_window_requested(&mut desktop.host(target), request);
                }
                UserEvent::Ipc(id, message) => {
                    if let Some(history) = message.history() {
                        desktop.record_history(id, history);
                    }

                    if let IpcMessage::Navigated { url, replace } = &message {
                        desktop.record_navigation(id, url, *replace);
                    } else if let Some(ctx) = message.context_menu_context() {
                        shell.on_context_menu_requested(&mut desktop.host(target), id, ctx);
                    } else if let Some(input) = message.key_input() {
                        let disposition = shell.on_key_input(&mut desktop.host(target), id, &input);
                        if disposition == InputDisposition::Forward {
                            debug!("Key {:?} on {} left to the page", input.key, id);
                        }
                    }
                }
                UserEvent::Menu(menu_id) => {
                    if let Some((id, action)) = desktop.take_menu_action(&menu_id) {
                        shell.perform_menu_action(&mut desktop.host(target), id, action);
                    }
                }
            },
            _ => {}
        }

        if desktop.exit_requested() {
            *control_flow = ControlFlow::Exit;
        }
    })
}
