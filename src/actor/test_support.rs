// src/actor/test_support.rs
//! 各fetch actor单元测试共用的HTTP替身。

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::{AppError, Result};
use crate::driver::{HttpClient, HttpResponse};

struct Inner {
    status: u16,
    body: String,
    fail_transport: bool,
    requests: u32,
    last_url: Option<String>,
}

/// 固定应答的HTTP客户端，记录请求次数与最后一次URL。
#[derive(Clone)]
pub struct ScriptedHttp(Rc<RefCell<Inner>>);

impl ScriptedHttp {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            status,
            body: body.to_string(),
            fail_transport: false,
            requests: 0,
            last_url: None,
        })))
    }

    pub fn failing() -> Self {
        let this = Self::status(200, "");
        this.0.borrow_mut().fail_transport = true;
        this
    }

    pub fn requests(&self) -> u32 {
        self.0.borrow().requests
    }

    pub fn last_url(&self) -> Option<String> {
        self.0.borrow().last_url.clone()
    }
}

impl HttpClient for ScriptedHttp {
    fn get(&mut self, url: &str, _timeout_ms: u32) -> Result<HttpResponse> {
        let mut inner = self.0.borrow_mut();
        inner.requests += 1;
        inner.last_url = Some(url.to_string());
        if inner.fail_transport {
            return Err(AppError::HttpTransport("connection refused".into()));
        }
        Ok(HttpResponse {
            status: inner.status,
            body: inner.body.clone(),
        })
    }
}
