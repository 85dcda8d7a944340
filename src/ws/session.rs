//! Per-connection WebSocket session actor. Parses client intents, hands
//! them to the room service, and relays broadcast messages back out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::services::rooms::{IntentRejection, JoinError, Rooms};
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// Broadcast payload delivered to a session from its room.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = WsSession::new(Uuid::new_v4(), app_state.rooms.clone());
    ws::start(session, &req, stream)
        .map_err(|err| AppError::internal(format!("websocket upgrade failed: {err}")))
}

pub struct WsSession {
    conn_id: Uuid,
    rooms: Arc<Rooms>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, rooms: Arc<Rooms>) -> Self {
        Self {
            conn_id,
            rooms,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_intent_result(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        result: Result<(), IntentRejection>,
    ) {
        match result {
            Ok(()) => {}
            // Stale or out-of-turn intents are dropped without a reply.
            Err(IntentRejection::Silent) => {}
            Err(IntentRejection::Answer(message)) => {
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        code: ErrorCode::IllegalPlay,
                        message,
                    },
                );
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.rooms.disconnect(self.conn_id);
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
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

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };

                match cmd {
                    ClientMsg::Join { mode, token, name } => {
                        let recipient = ctx.address().recipient::<Outbound>();
                        match self.rooms.join(self.conn_id, recipient, mode, token, name) {
                            Ok(()) => {}
                            Err(JoinError::Full) => Self::send_json(ctx, &ServerMsg::MatchFull),
                            Err(JoinError::AlreadySeated) => {
                                // Double join from the same socket; ignore.
                            }
                        }
                    }
                    ClientMsg::Play { card_ids } => {
                        let result = self.rooms.play(self.conn_id, &card_ids);
                        self.handle_intent_result(ctx, result);
                    }
                    ClientMsg::Pass => {
                        let result = self.rooms.pass(self.conn_id);
                        self.handle_intent_result(ctx, result);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
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
