//! Default trees used when no snapshot is available.

use super::types::Node;

/// Id of the explorer tree's root
pub const EXPLORER_ROOT_ID: &str = "root";

/// Id of the shell tree's root
pub const SHELL_ROOT_ID: &str = "/";

/// Initial tree shown by the explorer.
pub fn explorer_tree() -> Node {
    Node::directory(EXPLORER_ROOT_ID, "My Computer").with_children(vec![
        Node::directory("documents", "Documents").with_children(vec![
            Node::file("doc1", "Important document.txt", "The contents of an important document"),
            Node::file(
                "doc2",
                "Notes.txt",
                "To do:\n- Finish the project\n- Check mail\n- Make a call",
            ),
        ]),
        Node::directory("pictures", "Pictures"),
        Node::directory("downloads", "Downloads").with_children(vec![Node::file(
            "download1",
            "Instructions.txt",
            "How to use the virtual desktop",
        )]),
        Node::file("readme", "README.txt", "Welcome to the virtual file explorer!"),
    ])
}

/// Initial tree of a shell session. Ids are the nodes' absolute paths.
pub fn shell_tree() -> Node {
    Node::directory(SHELL_ROOT_ID, "/").with_children(vec![
        Node::directory("/home", "home").with_children(vec![
            Node::directory("/home/user", "user").with_children(vec![
                Node::directory("/home/user/documents", "documents").with_children(vec![
                    Node::file(
                        "/home/user/documents/readme.txt",
                        "readme.txt",
                        "This is a sample text file in the virtual file system.",
                    ),
                ]),
                Node::directory("/home/user/downloads", "downloads"),
            ]),
        ]),
        Node::directory("/etc", "etc").with_children(vec![Node::file(
            "/etc/hosts",
            "hosts",
            "127.0.0.1 localhost\n::1 localhost",
        )]),
        Node::directory("/var", "var")
            .with_children(vec![Node::directory("/var/log", "log")]),
    ])
}
