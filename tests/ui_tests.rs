//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests drive the real application state through a test surface,
//! simulating user interactions and checking the accessibility tree for
//! expected elements. Pipeline channels are held by the test so every
//! dispatched command and narrated reply can be asserted directly.

use crossbeam_channel::{bounded, Receiver, Sender};
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use herald::dispatch::{
    DispatchCommand, DispatchEvent, SubmissionOutcome, EMPTY_COMMAND_HINT, PROCESSING_NOTICE,
};
use herald::speech::{NarratorCommand, NarratorEvent};
use herald::ui::components::{BUSY_STATUS, SHORTCUTS};
use herald::ui::AppState;
use uuid::Uuid;

/// Application state wrapper holding the far ends of the pipeline channels
struct TestApp {
    state: AppState,
    dispatch_cmd_rx: Receiver<DispatchCommand>,
    dispatch_evt_tx: Sender<DispatchEvent>,
    narrator_cmd_rx: Receiver<NarratorCommand>,
}

impl TestApp {
    fn new() -> Self {
        let (cmd_tx, cmd_rx) = bounded(10);
        let (evt_tx, evt_rx) = bounded(10);
        let (narrator_tx, narrator_rx) = bounded(10);
        let (_narrator_evt_tx, narrator_evt_rx) = bounded::<NarratorEvent>(10);

        let mut state = AppState::new();
        state.attach_dispatch(cmd_tx, evt_rx);
        state.attach_narrator(narrator_tx, narrator_evt_rx);

        Self {
            state,
            dispatch_cmd_rx: cmd_rx,
            dispatch_evt_tx: evt_tx,
            narrator_cmd_rx: narrator_rx,
        }
    }

    /// Drain the texts handed to the narrator so far
    fn spoken(&self) -> Vec<String> {
        let mut texts = Vec::new();
        while let Ok(NarratorCommand::Speak { text }) = self.narrator_cmd_rx.try_recv() {
            texts.push(text);
        }
        texts
    }

    /// Expect the next dispatched submission
    fn next_submission(&self) -> (String, bool, Uuid) {
        match self.dispatch_cmd_rx.try_recv() {
            Ok(DispatchCommand::Submit {
                text,
                use_mic,
                request_id,
            }) => (text, use_mic, request_id),
            other => panic!("expected Submit command, got {:?}", other),
        }
    }
}

/// Render the assistant screen for testing
fn render_assistant_ui(app: &mut TestApp, ui: &mut egui::Ui) {
    app.state.poll_events();

    // Output area
    if app.state.is_busy() {
        let response = ui.label(BUSY_STATUS);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Label, true, "Status message")
        });
    } else {
        if !app.state.transcript.is_empty() {
            let heard_label = format!("Heard: {}", app.state.transcript);
            let response = ui.label(&app.state.transcript);
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &heard_label)
            });
        }

        let reply_label = format!("Assistant reply: {}", app.state.assistant_reply);
        let response = ui.label(&app.state.assistant_reply);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &reply_label)
        });
    }

    ui.separator();

    // Input area
    ui.horizontal(|ui| {
        let text_edit = egui::TextEdit::singleline(&mut app.state.command_text)
            .hint_text("Type a command...")
            .desired_width(200.0)
            .id(egui::Id::new("command_input"));

        let text_response = ui.add(text_edit);
        text_response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Command input")
        });

        let send_response = ui.add(egui::Button::new("Send"));
        send_response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Send command")
        });
        if send_response.clicked() {
            app.state.submit(false);
        }

        let mic_response = ui.add(egui::Button::new("Mic"));
        mic_response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Microphone")
        });
        if mic_response.clicked() {
            app.state.submit(true);
        }
    });

    // Shortcut row
    ui.horizontal(|ui| {
        for (label, command) in SHORTCUTS {
            let response = ui.add(egui::Button::new(label));
            let shortcut_label = format!("Shortcut: {command}");
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, &shortcut_label)
            });
            if response.clicked() {
                app.state.submit_shortcut(command);
            }
        }
    });
}

fn build_harness(app: TestApp) -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(500.0, 400.0))
        .build_state(
            |ctx, app: &mut TestApp| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    render_assistant_ui(app, ui);
                });
            },
            app,
        )
}

/// Test that the command input field exists and is accessible
#[test]
fn test_command_input_exists() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    let _input = harness.get_by_label("Command input");
}

/// Test that the send, microphone, and shortcut buttons exist
#[test]
fn test_controls_exist() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    let _send = harness.get_by_label("Send command");
    let _mic = harness.get_by_label("Microphone");
    let _time = harness.get_by_label("Shortcut: time");
    let _date = harness.get_by_label("Shortcut: date");
    let _wiki = harness.get_by_label("Shortcut: wikipedia India");
}

/// Test that typing text updates the command state on every keystroke
#[test]
fn test_type_text_into_input() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Command input").focus();
    harness.run();

    harness.get_by_label("Command input").type_text("time");
    harness.run();

    assert_eq!(harness.state().state.command_text, "time");
}

/// Test that an empty submission shows the hint and dispatches nothing
#[test]
fn test_empty_submit_shows_hint_without_dispatch() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Send command").click();
    harness.run();

    assert_eq!(harness.state().state.assistant_reply, EMPTY_COMMAND_HINT);
    assert!(!harness.state().state.is_busy());
    assert!(harness.state().dispatch_cmd_rx.try_recv().is_err());
    assert_eq!(
        harness.state().spoken(),
        vec![EMPTY_COMMAND_HINT.to_string()]
    );

    let reply_label = format!("Assistant reply: {EMPTY_COMMAND_HINT}");
    let _reply = harness.get_by_label(&reply_label);
}

/// Test that a typed submission goes busy and shows the status message
#[test]
fn test_typed_submit_goes_busy_and_shows_status() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Command input").focus();
    harness.run();
    harness.get_by_label("Command input").type_text("time");
    harness.run();

    harness.get_by_label("Send command").click();
    harness.run();

    assert!(harness.state().state.is_busy());
    assert_eq!(harness.state().state.assistant_reply, PROCESSING_NOTICE);
    assert!(harness.state().state.transcript.is_empty());

    let (text, use_mic, _id) = harness.state().next_submission();
    assert_eq!(text, "time");
    assert!(!use_mic);

    let _status = harness.get_by_label("Status message");
}

/// Test that the microphone button submits with the flag set even with
/// no typed text
#[test]
fn test_mic_button_submits_with_flag() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Microphone").click();
    harness.run();

    assert!(harness.state().state.is_busy());

    let (text, use_mic, _id) = harness.state().next_submission();
    assert!(text.is_empty());
    assert!(use_mic);
}

/// Test that a shortcut replaces the command text and submits it
#[test]
fn test_shortcut_sets_literal_and_submits() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Shortcut: wikipedia India").click();
    harness.run();

    assert_eq!(harness.state().state.command_text, "wikipedia India");

    let (text, use_mic, _id) = harness.state().next_submission();
    assert_eq!(text, "wikipedia India");
    assert!(!use_mic);
}

/// Test the complete flow: submit, resolve, display, narrate
#[test]
fn test_resolution_updates_display_and_narration() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Command input").focus();
    harness.run();
    harness.get_by_label("Command input").type_text("time");
    harness.run();

    harness.get_by_label("Send command").click();
    harness.run();

    let (_text, _use_mic, request_id) = harness.state().next_submission();

    harness
        .state()
        .dispatch_evt_tx
        .send(DispatchEvent::Completed {
            outcome: SubmissionOutcome {
                reply: "It is 5 PM".to_string(),
                transcript: "time".to_string(),
            },
            request_id,
        })
        .unwrap();

    // Re-run so the render pass polls the event
    harness.run();

    assert!(!harness.state().state.is_busy());
    assert_eq!(harness.state().state.assistant_reply, "It is 5 PM");
    assert_eq!(harness.state().state.transcript, "time");
    assert_eq!(
        harness.state().spoken(),
        vec![PROCESSING_NOTICE.to_string(), "It is 5 PM".to_string()]
    );

    let _heard = harness.get_by_label("Heard: time");
    let _reply = harness.get_by_label("Assistant reply: It is 5 PM");
}

/// Test that being busy does not block a second submission
#[test]
fn test_busy_does_not_block_new_submissions() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Command input").focus();
    harness.run();
    harness.get_by_label("Command input").type_text("time");
    harness.run();

    harness.get_by_label("Send command").click();
    harness.run();
    assert!(harness.state().state.is_busy());

    harness.get_by_label("Send command").click();
    harness.run();

    let (first, _, first_id) = harness.state().next_submission();
    let (second, _, second_id) = harness.state().next_submission();
    assert_eq!(first, "time");
    assert_eq!(second, "time");
    assert_ne!(first_id, second_id);
}

/// Test that a superseded submission's result is discarded
#[test]
fn test_stale_result_is_ignored() {
    let mut harness = build_harness(TestApp::new());
    harness.run();

    harness.get_by_label("Shortcut: time").click();
    harness.run();
    let (_t1, _m1, first_id) = harness.state().next_submission();

    harness.get_by_label("Shortcut: date").click();
    harness.run();
    let (_t2, _m2, second_id) = harness.state().next_submission();

    harness
        .state()
        .dispatch_evt_tx
        .send(DispatchEvent::Completed {
            outcome: SubmissionOutcome {
                reply: "stale".to_string(),
                transcript: "time".to_string(),
            },
            request_id: first_id,
        })
        .unwrap();
    harness.run();

    assert!(harness.state().state.is_busy());
    assert_eq!(harness.state().state.assistant_reply, PROCESSING_NOTICE);

    harness
        .state()
        .dispatch_evt_tx
        .send(DispatchEvent::Completed {
            outcome: SubmissionOutcome {
                reply: "Today is Tuesday".to_string(),
                transcript: "date".to_string(),
            },
            request_id: second_id,
        })
        .unwrap();
    harness.run();

    assert!(!harness.state().state.is_busy());
    assert_eq!(harness.state().state.assistant_reply, "Today is Tuesday");
    assert_eq!(harness.state().state.transcript, "date");
}
