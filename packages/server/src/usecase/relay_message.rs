//! UseCase: メッセージ中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 宛先ルームのレジストリへの中継と、エラーの分類
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン済みユーザーのメッセージが中継される
//! - 異常系：存在しないルーム宛て（ルーティングミス）、未ログインユーザーからの送信

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionHandle, RelayOutcome, RoomRegistry};

use super::error::RelayError;

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// RoomRegistry（ルームごとの接続レジストリの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージを宛先ルームへ中継する
    ///
    /// 送信元ストリームは最初のメッセージで `message.user_name` として遅延バインドされる。
    ///
    /// # Arguments
    ///
    /// * `sender` - メッセージを受信したストリームの送信キュー
    /// * `message` - 中継するメッセージ（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(RelayOutcome)` - 配信結果
    /// * `Err(RelayError)` - ルーティングミス、またはバインドの拒否
    pub async fn execute(
        &self,
        sender: &ConnectionHandle,
        message: ChatMessage,
    ) -> Result<RelayOutcome, RelayError> {
        let room = message.room_name.clone();
        let user = message.user_name.clone();

        let outcome = self.registry.relay(sender, message).await?;
        if outcome.newly_bound {
            tracing::info!(
                "Stream {} bound as '{}' in '{}'",
                sender.id(),
                user,
                room
            );
        }
        tracing::debug!(
            "Relayed message from '{}' in '{}' to {} recipient(s)",
            user,
            room,
            outcome.delivered.len()
        );

        Ok(outcome)
    }
}
