//! 前端静态文件

use std::path::Path;
use tower_http::services::ServeDir;

/// 前端目录服务
///
/// `/` 返回目录下的 index.html，其余路径按相对路径取文件，不存在时 404
pub fn frontend_service(frontend_dir: &Path) -> ServeDir {
    ServeDir::new(frontend_dir).append_index_html_on_directories(true)
}
