//! Message-bus tests against a local WebSocket server

mod chat_socket_test;
