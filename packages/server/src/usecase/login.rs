//! UseCase: ログイン（入室予約）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUseCase::execute() メソッド
//! - 入力検証とレジストリへの予約要求
//!
//! ### どのような状況を想定しているか
//! - 正常系：存在するルームへのログイン
//! - 異常系：存在しないルーム、空のルーム名・ユーザー名、接続中ユーザーとの重複

use std::sync::Arc;

use crate::domain::{Reservation, RoomName, RoomRegistry, UserName};

use super::error::LoginError;

/// ログインのユースケース
pub struct LoginUseCase {
    /// RoomRegistry（ルームごとの接続レジストリの抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl LoginUseCase {
    /// 新しい LoginUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ログインを実行
    ///
    /// ルームにユーザーの枠を予約する。ストリームとの紐付けは最初のメッセージ受信時に行われる。
    ///
    /// # Returns
    ///
    /// * `Ok(Reservation)` - 予約成功（既に予約済みの場合も成功）
    /// * `Err(LoginError)` - 入力不正、ルーム不在、または接続中ユーザーとの重複
    pub async fn execute(
        &self,
        room_name: String,
        user_name: String,
    ) -> Result<Reservation, LoginError> {
        // 1. 入力を Domain Model に変換
        let user = UserName::try_from(user_name)?;
        let room = RoomName::try_from(room_name)?;

        // 2. レジストリに予約
        let reservation = self.registry.reserve(&room, &user).await?;
        tracing::info!("User '{}' logged in to '{}' ({:?})", user, room, reservation);

        Ok(reservation)
    }
}
