//! Fake Reply Client（测试用）
//!
//! 返回固定回复，并记录调用次数与收到的请求

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{ReplyEnginePort, ReplyError, ReplyRequest};

/// 测试用回复客户端
pub struct FakeReplyClient {
    reply: String,
    call_count: AtomicUsize,
    fail_next: Mutex<Option<ReplyError>>,
    requests: Mutex<Vec<ReplyRequest>>,
}

impl FakeReplyClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            call_count: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 调用次数
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// 注入下一次调用的失败
    pub fn fail_next(&self, error: ReplyError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    /// 收到的全部请求
    pub fn requests(&self) -> Vec<ReplyRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyEnginePort for FakeReplyClient {
    async fn generate(&self, request: ReplyRequest) -> Result<String, ReplyError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }

        Ok(self.reply.clone())
    }
}
