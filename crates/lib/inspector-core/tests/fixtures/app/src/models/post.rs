pub struct Post;
