use tokio::io::{AsyncBufReadExt, BufReader};
use todo_page::{ClientConfig, TodoApi, TodoPage, UreqTransport, logging};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Add(String),
    Remove(usize),
    List,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
        match head {
            "add" => Command::Add(rest.trim().to_string()),
            "rm" => match rest.trim().parse() {
                Ok(n) => Command::Remove(n),
                Err(_) => Command::Unknown(line.to_string()),
            },
            "ls" | "" => Command::List,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(std::env::var_os("TODO_PAGE_QUIET").is_some());

    let config = ClientConfig::from_env()?;
    let mut page = TodoPage::new(TodoApi::new(&config), UreqTransport::new());
    page.effect();
    page.flush().await;
    print!("{}", page.view().render_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Add(text) => {
                page.set_text(text);
                if let Err(e) = page.create().await {
                    eprintln!("create failed: {e}");
                }
            }
            Command::Remove(n) => {
                let id = n
                    .checked_sub(1)
                    .and_then(|i| page.view().rows.get(i).map(|row| row.id.clone()));
                match id {
                    Some(id) => {
                        if let Err(e) = page.remove(&id).await {
                            eprintln!("remove failed: {e}");
                        }
                    }
                    None => eprintln!("no row {n}"),
                }
            }
            Command::List => {
                page.ticker().update();
                page.effect();
            }
            Command::Quit => break,
            Command::Unknown(line) => {
                eprintln!("unknown command '{line}' (add <text> | rm <n> | ls | quit)");
                continue;
            }
        }
        page.flush().await;
        print!("{}", page.view().render_text());
    }

    Ok(())
}
