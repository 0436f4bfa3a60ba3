// Copyright (C) Brian G. Milnes 2025

//! Tests for TryWithResources and UnnecessaryCloseInTryWithResources

use anyhow::Result;
mod common;
use common::{no_change, rewrite_run};

const TWR: &str = "staticfix.java.TryWithResources";
const UNNECESSARY_CLOSE: &str = "staticfix.java.UnnecessaryCloseInTryWithResources";

#[test]
fn test_finally_close_becomes_resource() -> Result<()> {
    rewrite_run(
        TWR,
        r#"
import java.io.FileInputStream;
import java.io.IOException;
import java.io.InputStream;

class Reader {
    int read() throws IOException {
        InputStream in = new FileInputStream("data.bin");
        try {
            return in.read();
        } finally {
            in.close();
        }
    }
}
"#,
        r#"
import java.io.FileInputStream;
import java.io.IOException;
import java.io.InputStream;

class Reader {
    int read() throws IOException {
        try (InputStream in = new FileInputStream("data.bin")) {
            return in.read();
        }
    }
}
"#,
    )
}

#[test]
fn test_two_resources_with_null_guard() -> Result<()> {
    rewrite_run(
        TWR,
        r#"
import java.io.*;

class Copy {
    void copy() throws IOException {
        InputStream in = new FileInputStream("a");
        OutputStream out = new FileOutputStream("b");
        try {
            out.write(in.read());
        } finally {
            if (out != null) {
                out.close();
            }
            in.close();
        }
    }
}
"#,
        r#"
import java.io.*;

class Copy {
    void copy() throws IOException {
        try (InputStream in = new FileInputStream("a"); OutputStream out = new FileOutputStream("b")) {
            out.write(in.read());
        }
    }
}
"#,
    )
}

#[test]
fn test_other_finally_statements_stay() -> Result<()> {
    rewrite_run(
        TWR,
        r#"
import java.io.*;

class Reader {
    void read() throws IOException {
        Reader r = null;
        InputStream in = new FileInputStream("f");
        try {
            in.read();
        } finally {
            in.close();
            done();
        }
    }
}
"#,
        r#"
import java.io.*;

class Reader {
    void read() throws IOException {
        Reader r = null;
        try (InputStream in = new FileInputStream("f")) {
            in.read();
        } finally {
            done();
        }
    }
}
"#,
    )
}

#[test]
fn test_close_through_helper_is_not_converted() -> Result<()> {
    no_change(
        TWR,
        r#"
import java.io.*;

class Reader {
    void read() throws IOException {
        InputStream in = new FileInputStream("f");
        try {
            in.read();
        } finally {
            Streams.closeQuietly(in);
        }
    }
}
"#,
    )
}

#[test]
fn test_resource_stored_in_field_is_not_converted() -> Result<()> {
    no_change(
        TWR,
        r#"
import java.io.*;

class Reader {
    private InputStream saved;

    void read() throws IOException {
        InputStream in = new FileInputStream("f");
        try {
            saved = in;
        } finally {
            in.close();
        }
    }
}
"#,
    )
}

#[test]
fn test_resource_used_after_try_is_not_converted() -> Result<()> {
    no_change(
        TWR,
        r#"
import java.io.*;

class Reader {
    void read() throws IOException {
        InputStream in = new FileInputStream("f");
        try {
            in.read();
        } finally {
            in.close();
        }
        in.available();
    }
}
"#,
    )
}

#[test]
fn test_resource_used_in_catch_is_not_converted() -> Result<()> {
    no_change(
        TWR,
        r#"
import java.io.*;

class Reader {
    void read() {
        InputStream in = new FileInputStream("f");
        try {
            in.read();
        } catch (IOException e) {
            report(in);
        } finally {
            in.close();
        }
    }
}
"#,
    )
}

#[test]
fn test_unknown_type_is_not_converted() -> Result<()> {
    no_change(
        TWR,
        r#"
class Reader {
    void read() {
        Channel c = open();
        try {
            c.send();
        } finally {
            c.close();
        }
    }
}
"#,
    )
}

#[test]
fn test_explicit_close_of_resource_removed() -> Result<()> {
    rewrite_run(
        UNNECESSARY_CLOSE,
        r#"
import java.io.*;

class Reader {
    void read() throws IOException {
        try (InputStream in = new FileInputStream("f")) {
            in.read();
            in.close();
        }
    }
}
"#,
        r#"
import java.io.*;

class Reader {
    void read() throws IOException {
        try (InputStream in = new FileInputStream("f")) {
            in.read();
        }
    }
}
"#,
    )
}

#[test]
fn test_close_of_other_variable_kept() -> Result<()> {
    no_change(
        UNNECESSARY_CLOSE,
        r#"
import java.io.*;

class Reader {
    void read(InputStream other) throws IOException {
        try (InputStream in = new FileInputStream("f")) {
            other.close();
        }
    }
}
"#,
    )
}

#[test]
fn test_nested_try_finally_pairs_both_converted() -> Result<()> {
    rewrite_run(
        TWR,
        r#"
import java.io.*;

class Copy {
    void copy() throws IOException {
        InputStream in = new FileInputStream("a");
        try {
            OutputStream out = new FileOutputStream("b");
            try {
                out.write(in.read());
            } finally {
                out.close();
            }
        } finally {
            in.close();
        }
    }
}
"#,
        r#"
import java.io.*;

class Copy {
    void copy() throws IOException {
        try (InputStream in = new FileInputStream("a")) {
            try (OutputStream out = new FileOutputStream("b")) {
                out.write(in.read());
            }
        }
    }
}
"#,
    )
}

#[test]
fn test_resource_reused_in_later_case_group_is_not_converted() -> Result<()> {
    no_change(
        TWR,
        r#"
import java.io.*;

class Reader {
    int read(int mode) throws IOException {
        switch (mode) {
            case 1:
                InputStream in = new FileInputStream("f");
                try {
                    in.read();
                } finally {
                    in.close();
                }
                break;
            default:
                in = new FileInputStream("g");
                return in.read();
        }
        return 0;
    }
}
"#,
    )
}

#[test]
fn test_conditional_close_of_resource_kept() -> Result<()> {
    no_change(
        UNNECESSARY_CLOSE,
        r#"
import java.io.*;

class Reader {
    void read(boolean done) throws IOException {
        try (InputStream in = new FileInputStream("f")) {
            if (done) in.close();
            in.read();
        }
    }
}
"#,
    )
}
