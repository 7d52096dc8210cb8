//! Interactive client loop.
//!
//! Input is read with rustyline on a blocking thread and forwarded over a
//! channel; the chat stream is read by a spawned task that prints every
//! relayed message.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{sync::mpsc, task::JoinHandle, time::timeout};

use roomcast_shared::time::{Clock, SystemClock};

use crate::{
    command::Command,
    error::ClientError,
    formatter::MessageFormatter,
    rpc::{ChatReceiver, ChatSender, RoomcastClient},
    session::{JOINED_MESSAGE, Session},
    ui::{print_above_prompt, redisplay_prompt},
};

/// How long closing a stream waits for the server to hang up
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether the input loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Open chat stream: the write half plus the task printing the read half
struct ActiveChat {
    /// Tags the close signal of this stream's reader
    generation: u64,
    /// Name the stream was opened (and bound) under
    user_name: String,
    sender: ChatSender,
    read_task: JoinHandle<()>,
}

impl ActiveChat {
    /// Send a close frame and wait until the server has hung up.
    ///
    /// The server releases the stream's bindings before it drops the socket,
    /// so once the reader ends the name can be used again.
    async fn close(self) {
        let ActiveChat {
            generation,
            sender,
            mut read_task,
            ..
        } = self;
        if let Err(e) = sender.close().await {
            tracing::debug!("Failed to close chat stream {}: {}", generation, e);
        }
        if timeout(CLOSE_TIMEOUT, &mut read_task).await.is_err() {
            tracing::warn!("Chat stream {} did not close in time", generation);
            read_task.abort();
        }
    }
}

/// Executes commands against the server and owns the chat stream
pub struct Runner {
    client: RoomcastClient,
    session: Session,
    clock: Box<dyn Clock>,
    chat: Option<ActiveChat>,
    /// Generation of the most recently opened stream
    generation: u64,
    /// Signalled by the read task with its generation when its stream ends
    closed_tx: mpsc::UnboundedSender<u64>,
}

impl Runner {
    /// Returns the runner and the receiver of stream-closed signals, which
    /// must be fed back through [`Runner::on_stream_closed`].
    pub fn new(
        client: RoomcastClient,
        user_name: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (closed_tx, closed_rx) = mpsc::unbounded_channel();
        let runner = Self {
            client,
            session: Session::new(user_name),
            clock,
            chat: None,
            generation: 0,
            closed_tx,
        };
        (runner, closed_rx)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// User name the open chat stream was bound under, if a stream is open
    pub fn streaming_as(&self) -> Option<&str> {
        self.chat.as_ref().map(|chat| chat.user_name.as_str())
    }

    pub async fn handle(&mut self, command: Command) -> Result<Flow, ClientError> {
        match command {
            Command::Empty => {}
            Command::Quit => return Ok(Flow::Quit),
            Command::GetRooms(substring) => {
                let mut found = 0;
                self.client
                    .stream_rooms(&substring, |room| {
                        found += 1;
                        println!("{}", MessageFormatter::format_room(&room));
                    })
                    .await?;
                if found == 0 {
                    println!("No rooms found");
                }
            }
            Command::Login(room) => self.login(room).await?,
            Command::UserName(name) => match self.session.set_user_name(&name) {
                Ok(changed) => {
                    if changed {
                        self.close_chat().await;
                    }
                    println!(
                        "{}",
                        MessageFormatter::format_user_name_changed(self.session.user_name())
                    );
                }
                Err(_) => println!("You haven't provided a user name :("),
            },
            Command::Logout => {
                let room = self.session.current_room().unwrap_or_default().to_string();
                let response = self.client.logout(&room, self.session.user_name()).await?;
                self.close_chat().await;
                self.session.on_logout();
                println!("{}", MessageFormatter::format_auth_response(&response));
            }
            Command::Chat(text) => self.send(&text).await?,
        }
        Ok(Flow::Continue)
    }

    async fn login(&mut self, room: String) -> Result<(), ClientError> {
        let response = self.client.login(&room, self.session.user_name()).await?;
        println!("{}", MessageFormatter::format_auth_response(&response));
        if !self.session.on_login(&room, &response) {
            return Ok(());
        }

        if self.streaming_as() != Some(self.session.user_name()) {
            self.close_chat().await;
            let (sender, receiver) = self.client.connect_chat().await?;
            self.generation += 1;
            let read_task = spawn_reader(
                receiver,
                self.session.user_name().to_string(),
                self.generation,
                self.closed_tx.clone(),
            );
            self.chat = Some(ActiveChat {
                generation: self.generation,
                user_name: self.session.user_name().to_string(),
                sender,
                read_task,
            });
            println!("{}", MessageFormatter::format_connection_established(&room));
        }

        self.send(JOINED_MESSAGE).await
    }

    async fn send(&mut self, text: &str) -> Result<(), ClientError> {
        let message = match self.session.outgoing(text, self.clock.as_ref()) {
            Ok(message) => message,
            Err(ClientError::NotJoined) => {
                println!("You have not joined a room yet. Use 'login <room>' first.");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let chat = self.chat.as_mut().ok_or(ClientError::StreamClosed)?;
        chat.sender.send(&message).await
    }

    async fn close_chat(&mut self) {
        if let Some(chat) = self.chat.take() {
            chat.close().await;
        }
    }

    /// React to the end of stream `generation`.
    ///
    /// Signals from streams the runner already closed itself are ignored.
    /// Returns whether the session was reset.
    pub async fn on_stream_closed(&mut self, generation: u64) -> bool {
        if !matches!(&self.chat, Some(chat) if chat.generation == generation) {
            return false;
        }
        self.close_chat().await;
        self.session.on_stream_closed();
        println!("Chat stream closed. Log in again to rejoin a room.");
        true
    }

    /// Close the open stream, if any
    pub async fn shutdown(&mut self) {
        self.close_chat().await;
    }
}

/// Print every relayed message until the stream ends.
///
/// `user_name` is the prompt shown under each message; it stays valid for the
/// lifetime of the stream because a name change closes the stream.
fn spawn_reader(
    mut receiver: ChatReceiver,
    user_name: String,
    generation: u64,
    closed_tx: mpsc::UnboundedSender<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = receiver.next_message().await {
            match message {
                Ok(message) => print_above_prompt(
                    &MessageFormatter::format_chat_message(&message),
                    &user_name,
                ),
                Err(e) => {
                    tracing::debug!("Chat stream {} read error: {}", generation, e);
                    break;
                }
            }
        }
        closed_tx.send(generation).ok();
    })
}

/// Spawn the blocking readline thread feeding `input_tx`
fn spawn_readline(input_tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });
}

/// Run the interactive chat client
pub async fn run_client(client: RoomcastClient, user_name: String) -> Result<(), ClientError> {
    let (mut runner, mut closed_rx) = Runner::new(client, user_name, Box::new(SystemClock));

    println!("Simple Chat");
    println!("---------------------");
    println!("Commands: get_rooms [substring] | login <room> | username <name> | logout | quit");

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    spawn_readline(input_tx);

    loop {
        tokio::select! {
            line = input_rx.recv() => {
                let Some(line) = line else { break };
                match runner.handle(Command::parse(&line)).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    // a failed command does not end the session
                    Err(e) => {
                        tracing::warn!("{}", e);
                        println!("Error: {}", e);
                    }
                }
            }
            Some(generation) = closed_rx.recv() => {
                if runner.on_stream_closed(generation).await {
                    redisplay_prompt(runner.session().user_name());
                }
            }
        }
    }

    runner.shutdown().await;
    tracing::info!("Client session ended");

    Ok(())
}
