//! UseCase: ルーム一覧検索
//!
//! 部分文字列に一致するルームをディレクトリ順に遅延列挙します。

use std::sync::Arc;

use crate::domain::{RoomDirectory, RoomMatches};

/// ルーム一覧検索のユースケース
pub struct GetRoomsUseCase {
    /// ルームディレクトリ（起動時に固定）
    directory: Arc<RoomDirectory>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(directory: Arc<RoomDirectory>) -> Self {
        Self { directory }
    }

    /// 名前に `substring` を含むルームを列挙する
    ///
    /// 空文字列は全ルームに一致する。戻り値のイテレータは呼び出し側が
    /// 1 件ずつ取り出すため、ストリーム応答をそのまま組み立てられる。
    pub fn execute(&self, substring: String) -> RoomMatches {
        tracing::debug!("Searching rooms with substring '{}'", substring);
        self.directory.search_owned(substring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(matches: RoomMatches) -> Vec<String> {
        matches.map(|room| room.name.into_string()).collect()
    }

    #[test]
    fn test_get_rooms_all() {
        // テスト項目: 空文字列で全ルームがディレクトリ順に返る
        // given (前提条件):
        let directory = Arc::new(RoomDirectory::with_room_count(7).unwrap());
        let usecase = GetRoomsUseCase::new(directory);

        // when (操作):
        let rooms = names(usecase.execute(String::new()));

        // then (期待する結果):
        assert_eq!(rooms.len(), 7);
        assert_eq!(rooms.first().map(String::as_str), Some("Room 0"));
        assert_eq!(rooms.last().map(String::as_str), Some("Room 6"));
    }

    #[test]
    fn test_get_rooms_filtered() {
        // テスト項目: 部分文字列に一致するルームのみが返る
        // given (前提条件):
        let directory = Arc::new(RoomDirectory::with_room_count(7).unwrap());
        let usecase = GetRoomsUseCase::new(directory);

        // when (操作):
        let exact = names(usecase.execute("Room 3".to_string()));
        let none = names(usecase.execute("Lobby".to_string()));

        // then (期待する結果):
        assert_eq!(exact, vec!["Room 3"]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_get_rooms_user_count_is_zero() {
        // テスト項目: 返却されるルームの user_count は常に 0
        // given (前提条件):
        let directory = Arc::new(RoomDirectory::with_room_count(3).unwrap());
        let usecase = GetRoomsUseCase::new(directory);

        // when (操作):
        let counts: Vec<u32> = usecase
            .execute(String::new())
            .map(|room| room.user_count)
            .collect();

        // then (期待する結果):
        assert_eq!(counts, vec![0, 0, 0]);
    }
}
