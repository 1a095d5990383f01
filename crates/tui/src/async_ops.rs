use std::sync::Arc;

use agentdeck_api::{HumanResponseRequest, SendRequest, SendResponse};
use agentdeck_api_client::ApiClient;

/// Commands that require async I/O (network calls).
pub enum AsyncCommand {
    /// POST `/send` — submit a new chat message.
    SendMessage { message: String },
    /// POST `/human_response` — answer the pending question.
    SubmitResponse { task_id: String, response: String },
    /// GET `/todo` — refresh the plan/checklist document.
    FetchTodo,
    /// GET `/files/{path}` — fetch workspace file contents.
    FetchFile { path: String },
}

/// Results returned by async commands. Errors are strings ready for display.
pub enum CommandResult {
    Send(Result<SendResponse, String>),
    Respond(Result<(), String>),
    Todo(Result<String, String>),
    File {
        path: String,
        result: Result<String, String>,
    },
}

pub async fn execute(cmd: AsyncCommand, client: Arc<ApiClient>) -> CommandResult {
    match cmd {
        AsyncCommand::SendMessage { message } => {
            let result = client
                .send(&SendRequest { message })
                .await
                .map_err(|e| format!("{e}"));
            CommandResult::Send(result)
        }

        AsyncCommand::SubmitResponse { task_id, response } => {
            let result = client
                .human_response(&HumanResponseRequest { task_id, response })
                .await
                .map(|_| ())
                .map_err(|e| format!("{e}"));
            CommandResult::Respond(result)
        }

        AsyncCommand::FetchTodo => {
            let result = client
                .todo()
                .await
                .map(|resp| resp.content)
                .map_err(|e| format!("{e}"));
            CommandResult::Todo(result)
        }

        AsyncCommand::FetchFile { path } => {
            let result = client.file(&path).await.map_err(|e| format!("{e}"));
            CommandResult::File { path, result }
        }
    }
}
