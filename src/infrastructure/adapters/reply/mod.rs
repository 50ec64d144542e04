//! Reply Adapter - 回复生成客户端实现

mod fake_reply_client;
mod openai_client;

pub use fake_reply_client::FakeReplyClient;
pub use openai_client::{OpenAiReplyClient, OpenAiReplyClientConfig};
