use anyhow::ensure;
use photomania::PhotoClient;

pub(crate) fn cmd_comments(client: &PhotoClient, id: u64, page: u32) -> anyhow::Result<()> {
    let comments = client.comments(id, page)?;
    ensure!(!comments.is_empty(), "No comments on page {}", page);
    for comment in comments {
        println!("{}: {}", comment.user_fullname, comment.body);
    }
    Ok(())
}
