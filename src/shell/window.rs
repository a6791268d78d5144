//! tao/wry binding for the popup shell
//!
//! One frameless always-on-top window, a slim tab-strip web view at the top
//! and one content web view per tab below it, only the active one visible.
//! Tab views are created unfocused so every keystroke reaches the window and
//! the shell state machine, never a tab.

use std::time::{Duration, Instant};

use tao::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
    keyboard::KeyCode,
    window::{Window, WindowBuilder},
};
use wry::{
    dpi::{LogicalPosition as WryLogicalPosition, LogicalSize as WryLogicalSize, Position, Size},
    Rect, WebView, WebViewBuilder,
};

use super::state::{KeyOutcome, PopupKey, ShellState};
use super::TabSpec;
use crate::error::WxError;

/// Auto-close timeout; reset to the full duration by every navigation key
const AUTO_CLOSE: Duration = Duration::from_secs(60);

/// Height of the tab strip in logical pixels
const STRIP_HEIGHT: f64 = 28.0;

/// Events posted back to the event loop from web-view callbacks
#[derive(Debug, Clone, Copy)]
enum ShellEvent {
    /// A tab label was clicked in the strip
    SelectTab(usize),
    /// A link was activated inside a scaled tab
    LinkActivated(usize),
}

/// Opens the popup and runs its event loop until the shell closes
///
/// The window is sized `100 + 640·mult` by `100 + 480·mult` logical pixels
/// and centered on the primary monitor.
///
/// # Errors
/// Fails when the window or a web view cannot be created; once the loop is
/// running, the only way out is the `Closed` state.
pub fn run(tabs: Vec<TabSpec>, mult: f64) -> Result<(), WxError> {
    let event_loop = EventLoopBuilder::<ShellEvent>::with_user_event().build();

    let width = 100.0 + 640.0 * mult;
    let height = 100.0 + 480.0 * mult;

    let window = WindowBuilder::new()
        .with_title("wxpop")
        .with_decorations(false)
        .with_always_on_top(true)
        .with_resizable(false)
        .with_inner_size(LogicalSize::new(width, height))
        .build(&event_loop)
        .map_err(|e| WxError::Window(e.to_string()))?;
    center_on_primary_monitor(&window);

    let strip_proxy = event_loop.create_proxy();
    let strip = WebViewBuilder::new()
        .with_bounds(logical_rect(0.0, 0.0, width, STRIP_HEIGHT))
        .with_html(strip_html(&tabs))
        .with_focused(false)
        .with_ipc_handler(move |request| {
            if let Some(index) = request.body().strip_prefix("tab:") {
                if let Ok(index) = index.parse() {
                    let _ = strip_proxy.send_event(ShellEvent::SelectTab(index));
                }
            }
        })
        .build_as_child(&window)
        .map_err(|e| WxError::Window(e.to_string()))?;

    let mut views = Vec::with_capacity(tabs.len());
    for (index, tab) in tabs.iter().enumerate() {
        let view = build_tab_view(
            event_loop.create_proxy(),
            &window,
            tab,
            index,
            width,
            height,
        )?;
        views.push(view);
    }

    let mut shell = ShellState::new(tabs.len());
    let mut active = 0usize;
    let mut dezoomed = vec![false; tabs.len()];
    let mut deadline = Instant::now() + AUTO_CLOSE;

    event_loop.run(move |event, _target, control_flow| {
        match event {
            Event::NewEvents(StartCause::Init) => {
                window.set_focus();
                *control_flow = ControlFlow::WaitUntil(deadline);
            }
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                shell.on_timeout();
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    shell.on_host_close();
                }
                WindowEvent::Focused(false) => {
                    shell.on_focus_lost();
                }
                WindowEvent::KeyboardInput { event: key, .. } => {
                    if key.state == ElementState::Pressed {
                        match shell.on_key(classify(key.physical_key)) {
                            KeyOutcome::Switched(next) => {
                                show_tab(&views, &strip, &mut active, next);
                                deadline = Instant::now() + AUTO_CLOSE;
                                *control_flow = ControlFlow::WaitUntil(deadline);
                            }
                            KeyOutcome::Dismissed | KeyOutcome::Ignored => {}
                        }
                    }
                }
                _ => {}
            },
            Event::UserEvent(ShellEvent::SelectTab(index)) => {
                if let Some(next) = shell.on_select(index) {
                    show_tab(&views, &strip, &mut active, next);
                }
            }
            Event::UserEvent(ShellEvent::LinkActivated(index)) => {
                // One-shot de-zoom: the first link activation in a scaled tab
                // resets its scale while the navigation proceeds.
                if let Some(done) = dezoomed.get_mut(index) {
                    if !*done {
                        if let Some(view) = views.get(index) {
                            let _ = view.zoom(1.0);
                        }
                        *done = true;
                    }
                }
            }
            _ => {}
        }

        if shell.is_closed() {
            *control_flow = ControlFlow::Exit;
        }
    })
}

/// Builds the content web view for one tab
fn build_tab_view(
    proxy: EventLoopProxy<ShellEvent>,
    window: &Window,
    tab: &TabSpec,
    index: usize,
    width: f64,
    height: f64,
) -> Result<WebView, WxError> {
    let scaled = tab.is_scaled();
    let view = WebViewBuilder::new()
        .with_bounds(logical_rect(
            0.0,
            STRIP_HEIGHT,
            width,
            height - STRIP_HEIGHT,
        ))
        .with_html(tab.html.clone())
        .with_focused(false)
        .with_navigation_handler(move |url| {
            // The initial content load is not a user interaction; only real
            // link targets trigger the de-zoom.
            if scaled && (url.starts_with("http://") || url.starts_with("https://")) {
                let _ = proxy.send_event(ShellEvent::LinkActivated(index));
            }
            true
        })
        .build_as_child(window)
        .map_err(|e| WxError::Window(e.to_string()))?;

    view.set_visible(index == 0)
        .map_err(|e| WxError::Window(e.to_string()))?;
    if scaled {
        let _ = view.zoom(tab.scale);
    }
    Ok(view)
}

/// Switches the visible content view and highlights the strip label
fn show_tab(views: &[WebView], strip: &WebView, active: &mut usize, next: usize) {
    if *active == next {
        return;
    }
    if let Some(view) = views.get(*active) {
        let _ = view.set_visible(false);
    }
    if let Some(view) = views.get(next) {
        let _ = view.set_visible(true);
    }
    let _ = strip.evaluate_script(&format!("setActive({next});"));
    *active = next;
}

/// Centers the window on the primary monitor
fn center_on_primary_monitor(window: &Window) {
    let Some(monitor) = window.primary_monitor() else {
        return;
    };
    let screen = monitor.size();
    let outer = window.outer_size();
    let x = monitor.position().x + (screen.width.saturating_sub(outer.width) / 2) as i32;
    let y = monitor.position().y + (screen.height.saturating_sub(outer.height) / 2) as i32;
    window.set_outer_position(PhysicalPosition::new(x, y));
}

/// Maps a physical key to its popup meaning
fn classify(key: KeyCode) -> PopupKey {
    match key {
        KeyCode::ArrowRight | KeyCode::Tab | KeyCode::Space => PopupKey::Next,
        KeyCode::ArrowLeft | KeyCode::Backspace | KeyCode::Delete => PopupKey::Prev,
        _ => PopupKey::Dismiss,
    }
}

/// A rectangle in logical coordinates
fn logical_rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect {
        position: Position::Logical(WryLogicalPosition::new(x, y)),
        size: Size::Logical(WryLogicalSize::new(width, height)),
    }
}

/// The tab-strip document: one clickable label per tab
fn strip_html(tabs: &[TabSpec]) -> String {
    let mut labels = String::new();
    for (index, tab) in tabs.iter().enumerate() {
        labels.push_str(&format!(
            r#"<span class="tab{active}" onclick="window.ipc.postMessage('tab:{index}')">{label}</span>"#,
            active = if index == 0 { " active" } else { "" },
            label = tab.label,
        ));
    }
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
html, body {{ margin: 0; padding: 0; background: #2c2c2c; overflow: hidden; user-select: none; }}
.strip {{ display: flex; height: {STRIP_HEIGHT}px; align-items: center; }}
.tab {{ color: #bbb; font: 12px sans-serif; padding: 0 12px; line-height: {STRIP_HEIGHT}px; cursor: default; white-space: nowrap; }}
.tab.active {{ color: #fff; background: #444; }}
</style>
</head>
<body>
<div class="strip">{labels}</div>
<script>
function setActive(n) {{
    document.querySelectorAll('.tab').forEach(function (el, i) {{
        el.classList.toggle('active', i === n);
    }});
}}
</script>
</body>
</html>"#
    )
}
