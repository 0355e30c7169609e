//! Direct chat
//!
//! Loads both participants, derives the channel, fetches the history and
//! opens a live transport. Every change signal from the transport triggers
//! a full history re-fetch; at most one fetch is in flight at a time.

use eframe::egui;

use crate::egui_app::api::{ImageApi, UserApi};
use crate::egui_app::chat::{ChatRoom, ChatSignal, ChatTransport};
use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::Route;
use crate::shared::display::{when_was_it_published, DecodedImage};
use crate::shared::error::ApiError;
use crate::shared::models::{ChatMessage, ChatSummary, ImageModel, User};

/// Both sides of the conversation
pub struct Participants {
    pub me: User,
    pub other: User,
    pub my_image: Option<ImageModel>,
    pub other_image: Option<ImageModel>,
}

/// Resolve the other user by id, then by username, and fetch both
/// profile pictures. Picture failures are tolerated.
pub async fn load_participants(
    users: UserApi,
    images: ImageApi,
    other_id: i64,
) -> Result<Participants, ApiError> {
    let (me, info, my_image) =
        tokio::join!(users.current(), users.by_id(other_id), images.profile_image());
    let me = me?;
    let other = users.by_username(&info?.username).await?;
    let other_image = match other.id {
        Some(id) => images.profile_image_of(id).await.ok(),
        None => None,
    };
    Ok(Participants {
        me,
        other,
        my_image: my_image.ok(),
        other_image,
    })
}

pub struct ChatState {
    pub other_id: i64,
    pub room: Option<ChatRoom>,
    pub draft: String,
    pub connected: bool,
    pub closed: Option<String>,
    pub chats: Vec<ChatSummary>,
    my_image: Option<DecodedImage>,
    other_image: Option<DecodedImage>,
    transport: Option<ChatTransport>,
    load: Option<Pending<Result<Participants, ApiError>>>,
    history: Option<Pending<Result<Vec<ChatMessage>, ApiError>>>,
    chat_list: Option<Pending<Result<Vec<ChatSummary>, ApiError>>>,
    open_chat: Option<Pending<Result<User, ApiError>>>,
    refetch_queued: bool,
    scroll_to_bottom: bool,
}

impl ChatState {
    pub fn new(ctx: &AppContext, other_id: i64) -> Self {
        let load = ctx.spawn(load_participants(ctx.api.users(), ctx.api.images(), other_id));
        Self {
            other_id,
            room: None,
            draft: String::new(),
            connected: false,
            closed: None,
            chats: Vec::new(),
            my_image: None,
            other_image: None,
            transport: None,
            load: Some(load),
            history: None,
            chat_list: None,
            open_chat: None,
            refetch_queued: false,
            scroll_to_bottom: false,
        }
    }

    fn fetch_history(&mut self, ctx: &AppContext) {
        let Some(room) = &self.room else { return };
        if self.history.is_some() {
            self.refetch_queued = true;
            return;
        }
        let chat_api = ctx.api.chat();
        let channel = room.channel().clone();
        self.history = Some(ctx.spawn(async move { chat_api.messages(&channel).await }));
    }

    pub fn send(&mut self) {
        let (Some(room), Some(transport)) = (&self.room, &self.transport) else {
            return;
        };
        if transport.send(&room.me().username, &self.draft) {
            self.draft.clear();
        }
    }

    pub fn open_chat(&mut self, ctx: &AppContext, username: &str) {
        let users_api = ctx.api.users();
        let username = username.to_string();
        self.open_chat = Some(ctx.spawn(async move { users_api.by_username(&username).await }));
    }

    fn on_participants(&mut self, ctx: &AppContext, participants: Participants) {
        self.my_image = participants
            .my_image
            .and_then(|i| super::decode_slot("chat-me", i.image_bytes.as_deref()));
        self.other_image = participants
            .other_image
            .and_then(|i| super::decode_slot("chat-other", i.image_bytes.as_deref()));

        let room = match ChatRoom::new(&participants.me, &participants.other) {
            Ok(room) => room,
            Err(e) => {
                tracing::warn!("[CHAT] Cannot open chat: {}", e);
                ctx.notifier.show_snack_bar("Error opening chat.");
                return;
            }
        };

        let channel = room.channel().clone();
        self.transport = Some(ChatTransport::open(
            &ctx.handle,
            &ctx.config.chat_socket_url(),
            ctx.session.authorization_header(),
            channel,
        ));

        let chat_api = ctx.api.chat();
        let username = room.me().username.clone();
        self.chat_list = Some(ctx.spawn(async move { chat_api.chats(&username).await }));

        self.room = Some(room);
        self.fetch_history(ctx);
    }

    pub fn poll(&mut self, ctx: &AppContext) -> Option<Route> {
        match take_ready(&mut self.load) {
            Some(Ok(participants)) => self.on_participants(ctx, participants),
            Some(Err(e)) => {
                tracing::warn!("[CHAT] Loading participants failed: {}", e);
                ctx.notifier.show_snack_bar("Error opening chat.");
            }
            None => {}
        }

        let signals = self.transport.as_ref().map(|t| t.poll()).unwrap_or_default();
        for signal in signals {
            match signal {
                ChatSignal::Connected => {
                    self.connected = true;
                    self.closed = None;
                }
                ChatSignal::Changed => self.fetch_history(ctx),
                ChatSignal::Closed(reason) => {
                    self.connected = false;
                    self.closed = Some(reason.unwrap_or_else(|| "Disconnected".to_string()));
                }
            }
        }
        // A task that ended without a Closed signal (e.g. it panicked).
        let ended = self.transport.as_ref().is_some_and(|t| t.is_finished());
        if ended && self.closed.is_none() {
            self.connected = false;
            self.closed = Some("Disconnected".to_string());
        }

        match take_ready(&mut self.history) {
            Some(Ok(messages)) => {
                if let Some(room) = &mut self.room {
                    room.replace_history(messages);
                    self.scroll_to_bottom = true;
                }
            }
            Some(Err(e)) => tracing::warn!("[CHAT] Loading messages failed: {}", e),
            None => {}
        }
        if self.history.is_none() && self.refetch_queued {
            self.refetch_queued = false;
            self.fetch_history(ctx);
        }

        match take_ready(&mut self.chat_list) {
            Some(Ok(chats)) => self.chats = chats,
            Some(Err(e)) => tracing::warn!("[CHAT] Loading chat list failed: {}", e),
            None => {}
        }

        match take_ready(&mut self.open_chat)? {
            Ok(user) => user.id.map(Route::Chat),
            Err(e) => {
                tracing::warn!("[CHAT] Opening chat failed: {}", e);
                None
            }
        }
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut ChatState, ctx: &AppContext) -> Option<Route> {
    let mut next = None;

    let Some(room) = state.room.clone() else {
        super::loading(ui, "Connecting to chat...");
        return None;
    };

    let mut switch_to = None;
    egui::SidePanel::left("chat_list")
        .resizable(false)
        .default_width(180.0)
        .frame(styles::chat_list_frame())
        .show_inside(ui, |ui| {
            ui.label(egui::RichText::new("Chats").strong().color(colors::TEXT_PRIMARY));
            ui.separator();
            for chat in &state.chats {
                let Some(other) = chat.counterpart(&room.me().username) else {
                    continue;
                };
                let current = other == room.other().username;
                if ui.selectable_label(current, other).clicked() && !current {
                    switch_to = Some(other.to_string());
                }
            }
        });
    if let Some(username) = switch_to {
        state.open_chat(ctx, &username);
    }

    ui.horizontal(|ui| {
        super::avatar(ui, state.other_image.as_ref(), 36.0);
        let header = ui.add(
            egui::Label::new(
                egui::RichText::new(room.other().display_name())
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            )
            .sense(egui::Sense::click()),
        );
        if header.clicked() {
            next = room.other().id.map(Route::Profile);
        }
        let (status, color) = match (&state.closed, state.connected) {
            (Some(reason), _) => (reason.as_str(), colors::ERROR),
            (None, true) => ("connected", colors::SUCCESS),
            (None, false) => ("connecting...", colors::TEXT_SECONDARY),
        };
        ui.colored_label(color, status);
    });
    ui.separator();

    let input_height = 40.0;
    let scroll = egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height(ui.available_height() - input_height)
        .stick_to_bottom(true);
    scroll.show(ui, |ui| {
        for message in room.messages() {
            render_message(ui, &room, message, state.my_image.as_ref(), state.other_image.as_ref());
        }
        if state.scroll_to_bottom {
            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            state.scroll_to_bottom = false;
        }
    });

    ui.horizontal(|ui| {
        let edit = ui.add_sized(
            [ui.available_width() - 80.0, 28.0],
            egui::TextEdit::singleline(&mut state.draft).hint_text("Message"),
        );
        let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let send = ui.add_enabled(state.connected, egui::Button::new("Send"));
        if send.clicked() || (enter && state.connected) {
            state.send();
            edit.request_focus();
        }
    });

    next
}

fn render_message(
    ui: &mut egui::Ui,
    room: &ChatRoom,
    message: &ChatMessage,
    my_image: Option<&DecodedImage>,
    other_image: Option<&DecodedImage>,
) {
    let own = room.is_own(message);
    let layout = if own {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };
    let frame = if own {
        styles::outgoing_bubble_frame()
    } else {
        styles::incoming_bubble_frame()
    };

    ui.with_layout(layout, |ui| {
        super::avatar(ui, if own { my_image } else { other_image }, 28.0);
        frame.show(ui, |ui| {
            ui.set_max_width(360.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&message.content).color(colors::TEXT_PRIMARY));
                if let Some(timestamp) = &message.timestamp {
                    ui.label(
                        egui::RichText::new(when_was_it_published(timestamp))
                            .size(10.0)
                            .color(colors::TIMESTAMP),
                    );
                }
            });
        });
    });
    ui.add_space(4.0);
}
