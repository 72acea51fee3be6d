// ==========================================
// BOQ 策略模板迁移工具 - SQLite 连接初始化
// ==========================================
// 目标:
// - 导出方向统一通过此处打开连接
// - 统一 busy_timeout，避免源库被其他进程写入时偶发 busy 错误
// - 只读打开，导出过程不修改源库
// ==========================================

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一参数
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 以只读方式打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection<P: AsRef<Path>>(db_path: P) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}
