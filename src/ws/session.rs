use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::domain::GameError;
use crate::services::rooms::RoomService;
use crate::state::app_state::AppState;
use crate::state::room::Room;
use crate::ws::hub::Outbound;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(app_state.get_ref().clone());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    state: AppState,
    rooms: RoomService,
    /// Set once the connection is seated: (room_id, username).
    identity: Option<(String, String)>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(state: AppState) -> Self {
        let rooms = RoomService::new(state.clone());
        Self {
            conn_id: Uuid::new_v4(),
            state,
            rooms,
            identity: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize outbound message"),
        }
    }

    fn send_game_error(ctx: &mut ws::WebsocketContext<Self>, err: &GameError) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code: err.code().to_string(),
                message: err.to_string(),
            },
        );
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: &str, message: &str) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code: code.to_string(),
                message: message.to_string(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Run a game command against the room this connection is seated in.
    fn game_command<F>(&self, ctx: &mut ws::WebsocketContext<Self>, room_id: &str, f: F)
    where
        F: FnOnce(&RoomService, &mut Room, &str) -> Result<(), GameError>,
    {
        let Some((my_room, username)) = self.identity.clone() else {
            Self::send_error(ctx, "NOT_IN_ROOM", "join a room first");
            return;
        };
        if my_room != room_id {
            Self::send_game_error(ctx, &GameError::RoomNotFound);
            return;
        }
        let Some(handle) = self.state.registry.get(room_id) else {
            Self::send_game_error(ctx, &GameError::RoomNotFound);
            return;
        };
        let mut room = handle.lock();
        if let Err(err) = f(&self.rooms, &mut room, &username) {
            Self::send_game_error(ctx, &err);
        }
    }

    fn dispatch(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMsg::CreateRoom { username } => {
                if self.identity.is_some() {
                    Self::send_error(ctx, "ALREADY_IN_ROOM", "leave your room first");
                    return;
                }
                match self.rooms.create_room(&username, self.conn_id) {
                    Ok((room_id, username)) => {
                        self.identity = Some((room_id.clone(), username.clone()));
                        Self::send_json(ctx, &ServerMsg::RoomCreated { room_id, username });
                    }
                    Err(err) => Self::send_game_error(ctx, &err),
                }
            }
            ClientMsg::JoinRoom { username, room_id }
            | ClientMsg::ReconnectToRoom { username, room_id } => {
                if self.identity.is_some() {
                    Self::send_error(ctx, "ALREADY_IN_ROOM", "leave your room first");
                    return;
                }
                match self.rooms.join_room(&username, &room_id, self.conn_id) {
                    Ok(outcome) => {
                        let username = outcome.username().to_string();
                        self.identity = Some((room_id.clone(), username.clone()));
                        Self::send_json(ctx, &ServerMsg::RoomJoined { room_id, username });
                    }
                    Err(err) => Self::send_game_error(ctx, &err),
                }
            }
            ClientMsg::StartGame { room_id } => {
                self.game_command(ctx, &room_id, |rooms, room, username| {
                    rooms.flow().start_game(room, username)
                });
            }
            ClientMsg::PlayCard {
                room_id,
                card,
                position,
            } => {
                self.game_command(ctx, &room_id, |rooms, room, username| {
                    rooms.flow().play_card(room, username, card.0, position)
                });
            }
            ClientMsg::Pass { room_id } => {
                self.game_command(ctx, &room_id, |rooms, room, username| {
                    rooms.flow().pass(room, username)
                });
            }
            ClientMsg::Forfeit { room_id } => {
                self.game_command(ctx, &room_id, |rooms, room, username| {
                    rooms.flow().forfeit(room, username)
                });
            }
            ClientMsg::LeaveRoom { room_id } => {
                let Some((my_room, username)) = self.identity.clone() else {
                    Self::send_error(ctx, "NOT_IN_ROOM", "join a room first");
                    return;
                };
                if my_room != room_id {
                    Self::send_game_error(ctx, &GameError::RoomNotFound);
                    return;
                }
                if let Err(err) = self.rooms.leave_room(&room_id, &username) {
                    Self::send_game_error(ctx, &err);
                    return;
                }
                self.identity = None;
                Self::send_json(ctx, &ServerMsg::PlayerLeft { username });
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "websocket session started");
        self.state
            .hub
            .register(self.conn_id, ctx.address().recipient::<Outbound>());
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.state.hub.unregister(self.conn_id);
        if let Some((room_id, username)) = self.identity.take() {
            self.rooms.handle_disconnect(&room_id, &username);
        }
        info!(conn_id = %self.conn_id, "websocket session stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.dispatch(cmd, ctx),
                    Err(err) => {
                        Self::send_error(ctx, "BAD_REQUEST", &format!("malformed message: {err}"));
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, "BAD_REQUEST", "binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "websocket protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
